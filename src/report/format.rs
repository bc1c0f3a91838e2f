//! Terminal output formatting.
//!
//! Kept separate from the solvers so output changes stay local. Everything
//! here is pure string building; printing happens in `app`.

use nalgebra::DVector;

/// `True` / `False`, one line, no trailing newline.
pub fn format_verification(ok: bool) -> &'static str {
    if ok { "True" } else { "False" }
}

/// One `"<index>, <value>"` line per component, in column order.
///
/// With `names`, lines become `"<index>, <name>, <value>"`.
pub fn format_coefficients(x: &DVector<f64>, names: Option<&[String]>) -> String {
    let mut out = String::new();
    for (i, &v) in x.iter().enumerate() {
        match names.and_then(|n| n.get(i)) {
            Some(name) => out.push_str(&format!("{i}, {name}, {}\n", fmt_value(v))),
            None => out.push_str(&format!("{i}, {}\n", fmt_value(v))),
        }
    }
    out
}

/// Shortest round-trip decimal, always with a fractional part for integral
/// values (`-10.0`, not `-10`).
pub fn fmt_value(v: f64) -> String {
    format!("{v:?}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verification_words() {
        assert_eq!(format_verification(true), "True");
        assert_eq!(format_verification(false), "False");
    }

    #[test]
    fn coefficients_are_indexed_in_order() {
        let x = DVector::from_row_slice(&[3.0, -10.0, 0.125]);
        assert_eq!(format_coefficients(&x, None), "0, 3.0\n1, -10.0\n2, 0.125\n");
    }

    #[test]
    fn coefficients_with_names() {
        let x = DVector::from_row_slice(&[1.5, -2.0]);
        let names = vec!["a.sm".to_string(), "b.sm".to_string()];
        assert_eq!(
            format_coefficients(&x, Some(&names)),
            "0, a.sm, 1.5\n1, b.sm, -2.0\n"
        );
    }

    #[test]
    fn empty_vector_prints_nothing() {
        assert_eq!(format_coefficients(&DVector::zeros(0), None), "");
    }

    #[test]
    fn values_round_trip() {
        let v = 0.1 + 0.2;
        assert_eq!(fmt_value(v).parse::<f64>().unwrap(), v);
    }
}
