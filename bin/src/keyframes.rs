//! Keyframe transformation parsing

use motion_core::geometry::Vector3f;
use motion_core::pbrt::Float;
use motion_core::transform_set::TransformSet;

/// Applies `;` separated transformation operations to the active slots of a
/// transform set. Operations are concatenated in order like scene file
/// transformation directives.
///
/// * `ts`  - The transform set.
/// * `ops` - The operations.
pub fn apply_ops(ts: &mut TransformSet, ops: &str) -> Result<(), String> {
    for op in ops.split(';').map(str::trim).filter(|op| !op.is_empty()) {
        let mut tokens = op.split_whitespace();
        let name = tokens.next().unwrap_or_default();
        let args = tokens
            .map(|t| {
                t.parse::<Float>()
                    .map_err(|e| format!("Invalid number '{t}' in '{op}': {e}"))
            })
            .collect::<Result<Vec<Float>, String>>()?;

        match (name, args.as_slice()) {
            ("identity", []) => ts.identity(),
            ("translate", [x, y, z]) => ts.translate(&Vector3f::new(*x, *y, *z)),
            ("scale", [x, y, z]) => ts.scale(*x, *y, *z),
            ("rotate", [angle, x, y, z]) => {
                let axis = Vector3f::new(*x, *y, *z);
                if axis.length_squared() == 0.0 {
                    return Err(format!("Rotation axis is zero in '{op}'"));
                }
                ts.rotate(*angle, &axis);
            }
            ("identity" | "translate" | "scale" | "rotate", _) => {
                return Err(format!(
                    "Wrong number of arguments ({}) for '{name}' in '{op}'",
                    args.len()
                ))
            }
            _ => return Err(format!("Unknown transformation '{name}'")),
        }
        debug!("Applied '{}'", op);
    }
    Ok(())
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use motion_core::geometry::{Point3f, Transform};
    use motion_core::transform_set::{END_TRANSFORM_BITS, START_TRANSFORM_BITS};

    #[test]
    fn operations_concatenate_in_order() {
        let mut ts = TransformSet::default();
        apply_ops(&mut ts, "translate 1 0 0; scale 2 2 2").unwrap();
        assert_eq!(
            ts[0].transform_point(&Point3f::new(1.0, 1.0, 1.0)),
            Point3f::new(3.0, 2.0, 2.0)
        );
        assert_eq!(ts[0], ts[1]);
    }

    #[test]
    fn keyframes_are_independent() {
        let mut ts = TransformSet::default();
        ts.set_active(START_TRANSFORM_BITS);
        apply_ops(&mut ts, "identity").unwrap();
        ts.set_active(END_TRANSFORM_BITS);
        apply_ops(&mut ts, " rotate 90 0 0 1 ; ").unwrap();
        assert!(ts.is_animated());
        assert!(ts[0].is_identity());
        assert_eq!(ts[1], Transform::rotate(90.0, &Vector3f::new(0.0, 0.0, 1.0)));
    }

    #[test]
    fn empty_string_is_identity() {
        let mut ts = TransformSet::default();
        apply_ops(&mut ts, "").unwrap();
        assert!(ts[0].is_identity());
    }

    #[test]
    fn reports_errors() {
        let mut ts = TransformSet::default();
        assert!(apply_ops(&mut ts, "shear 1 2 3").is_err());
        assert!(apply_ops(&mut ts, "translate 1 2").is_err());
        assert!(apply_ops(&mut ts, "scale 1 x 3").is_err());
        assert!(apply_ops(&mut ts, "rotate 45 0 0 0").is_err());
        assert!(apply_ops(&mut ts, "identity 1").is_err());
    }
}
