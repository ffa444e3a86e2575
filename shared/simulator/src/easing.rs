// Easing curves over progress in [0, 1].

pub fn ease_out_expo(x: f64) -> f64 {
    if x >= 1.0 {
        1.0
    } else {
        1.0 - 2f64.powf(-10.0 * x)
    }
}

pub fn ease_in_expo(x: f64) -> f64 {
    if x <= 0.0 {
        0.0
    } else {
        2f64.powf(10.0 * x - 10.0)
    }
}

pub fn ease_out_cubic(x: f64) -> f64 {
    1.0 - (1.0 - x).powi(3)
}

pub fn ease_in_cubic(x: f64) -> f64 {
    x * x * x
}
