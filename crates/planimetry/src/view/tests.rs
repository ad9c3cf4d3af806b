use super::*;
use nalgebra::vector;
use proptest::prelude::*;

fn tf(w: f64, h: f64, s: f64) -> Transform {
    Transform::from_raw(w, h, s).unwrap()
}

#[test]
fn origin_maps_to_viewport_center() {
    let t = tf(600.0, 400.0, 60.0);
    assert_eq!(t.to_device(vector![0.0, 0.0]), vector![300.0, 200.0]);
    assert_eq!(t.to_model(vector![300.0, 200.0]), vector![0.0, 0.0]);
}

#[test]
fn model_y_grows_upward() {
    let t = tf(600.0, 600.0, 60.0);
    let up = t.to_device(vector![0.0, 1.0]);
    assert_eq!(up, vector![300.0, 240.0]);
    let right = t.to_device(vector![2.0, 0.0]);
    assert_eq!(right, vector![420.0, 300.0]);
}

#[test]
fn zero_and_negative_scale_are_domain_errors() {
    assert_eq!(Scale::new(0.0), Err(DomainError::Scale(0.0)));
    assert_eq!(Scale::new(-1.0), Err(DomainError::Scale(-1.0)));
    assert!(Scale::new(f64::NAN).is_err());
    assert!(Scale::new(f64::INFINITY).is_err());
    assert!(Transform::from_raw(100.0, 100.0, 0.0).is_err());
}

#[test]
fn negative_viewport_is_a_domain_error() {
    assert!(Viewport::new(-1.0, 10.0).is_err());
    assert!(Viewport::new(10.0, f64::NAN).is_err());
    // Zero-sized surfaces are allowed (collapsed container).
    assert!(Viewport::new(0.0, 0.0).is_ok());
}

#[test]
fn zoom_multiplies_and_divides() {
    let s = Scale::new(60.0).unwrap();
    let zin = s.zoomed(Zoom::In, 1.2).unwrap();
    assert!((zin.get() - 72.0).abs() < 1e-12);
    let back = zin.zoomed(Zoom::Out, 1.2).unwrap();
    assert!((back.get() - 60.0).abs() < 1e-12);
}

#[test]
fn lengths_convert_with_scale() {
    let t = tf(600.0, 600.0, 60.0);
    assert_eq!(t.model_len(30.0), 0.5);
    assert_eq!(t.device_len(0.5), 30.0);
}

#[test]
fn serde_rejects_invalid_scale() {
    let ok: Scale = serde_json::from_str("60.0").unwrap();
    assert_eq!(ok.get(), 60.0);
    assert!(serde_json::from_str::<Scale>("0.0").is_err());
    assert!(serde_json::from_str::<Viewport>(r#"{"width": -3, "height": 4}"#).is_err());
    let vp: Viewport = serde_json::from_str(r#"{"width": 800, "height": 600}"#).unwrap();
    assert_eq!((vp.width(), vp.height()), (800.0, 600.0));
}

proptest! {
    #[test]
    fn transform_round_trips(
        x in -100.0..100.0f64,
        y in -100.0..100.0f64,
        w in 0.0..4000.0f64,
        h in 0.0..4000.0f64,
        s in 1.0..200.0f64,
    ) {
        let t = tf(w, h, s);
        let p = vector![x, y];
        let back = t.to_model(t.to_device(p));
        prop_assert!((back - p).norm() < 1e-9, "{p:?} -> {back:?}");
    }
}
