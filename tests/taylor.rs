use approx::assert_abs_diff_eq;
use graphdiff::{derivatives, taylor, DifferentiableFunction, Node, Result};

fn cubic(x: &Node<f64>) -> Result<Node<f64>> {
    Ok(x.powi(3)? + 2.0 * x.powi(2)? + x + 1.0)
}

fn cubic_f64(x: f64) -> f64 {
    x.powi(3) + 2.0 * x.powi(2) + x + 1.0
}

#[test]
fn cubic_expansion_is_exact() {
    let f = DifferentiableFunction::new(cubic);
    let x0 = 1.0;
    let derivs = f.derivatives(&Node::variable(x0), 4).unwrap();

    let x = Node::variable(2.1);
    let approx = f.taylor_polynomial(&x, x0, &derivs).unwrap();
    let exact = f.call(&x).unwrap().value();
    assert_abs_diff_eq!(approx, exact, epsilon = 1e-9);
    assert_abs_diff_eq!(approx, cubic_f64(2.1), epsilon = 1e-9);
}

#[test]
fn free_function_matches_method() {
    let x0 = Node::variable(1.0);
    let derivs = derivatives(cubic, &x0, 4).unwrap();
    let x = Node::variable(2.1);
    let value_at_x0 = cubic_f64(1.0);
    assert_abs_diff_eq!(
        taylor(&x, 1.0, value_at_x0, &derivs),
        cubic_f64(2.1),
        epsilon = 1e-9
    );
}

#[test]
fn truncation_gives_partial_sums() {
    let x0 = Node::variable(1.0);
    let derivs = derivatives(cubic, &x0, 3).unwrap();
    let x = Node::variable(1.5);
    let dx: f64 = 0.5;

    let p0 = taylor(&x, 1.0, 5.0, &[]);
    let p1 = taylor(&x, 1.0, 5.0, &derivs[..1]);
    let p2 = taylor(&x, 1.0, 5.0, &derivs[..2]);
    assert_eq!(p0, 5.0);
    assert_abs_diff_eq!(p1, 5.0 + 8.0 * dx, epsilon = 1e-12);
    assert_abs_diff_eq!(p2, 5.0 + 8.0 * dx + 10.0 * dx * dx / 2.0, epsilon = 1e-12);
}

#[test]
fn expansion_at_center_is_value() {
    let f = DifferentiableFunction::new(|x: &Node<f64>| Ok(x.sin() * x.exp()));
    let x0 = 0.3;
    let derivs = f.derivatives(&Node::variable(x0), 5).unwrap();
    let at_center = f.taylor_polynomial(&Node::variable(x0), x0, &derivs).unwrap();
    assert_abs_diff_eq!(at_center, f.eval(x0).unwrap(), epsilon = 1e-15);
}

#[test]
fn exp_series_converges() {
    let f = DifferentiableFunction::new(|x: &Node<f64>| Ok(x.exp()));
    let derivs = f.derivatives(&Node::variable(0.0), 12).unwrap();
    let approx = f.taylor_polynomial(&Node::variable(0.5), 0.0, &derivs).unwrap();
    assert_abs_diff_eq!(approx, 0.5_f64.exp(), epsilon = 1e-12);
}

#[test]
fn sin_series_near_center() {
    let f = DifferentiableFunction::new(|x: &Node<f64>| Ok(x.sin()));
    let x0 = 0.2;
    let derivs = f.derivatives(&Node::variable(x0), 6).unwrap();
    let approx = f.taylor_polynomial(&Node::variable(0.35), x0, &derivs).unwrap();
    // remainder bounded by 0.15^7 / 7!
    assert_abs_diff_eq!(approx, 0.35_f64.sin(), epsilon = 1e-9);
}
