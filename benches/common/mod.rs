use graphdiff::{Node, Result};

// ─── Rosenbrock ────────────────────────────────────────────────────────────

pub fn rosenbrock(x: &[Node<f64>]) -> Result<Node<f64>> {
    let mut sum = Node::zero();
    for i in 0..x.len() - 1 {
        let t1 = 1.0 - &x[i];
        let t2 = &x[i + 1] - &x[i] * &x[i];
        sum = sum + &t1 * &t1 + 100.0 * &t2 * &t2;
    }
    Ok(sum)
}

pub fn rosenbrock_f64(x: &[f64]) -> f64 {
    let mut sum = 0.0;
    for i in 0..x.len() - 1 {
        let t1 = 1.0 - x[i];
        let t2 = x[i + 1] - x[i] * x[i];
        sum += t1 * t1 + 100.0 * t2 * t2;
    }
    sum
}

// ─── One-dimensional test functions ────────────────────────────────────────

/// x³ + 2x² + x + 1
pub fn cubic(x: &Node<f64>) -> Result<Node<f64>> {
    Ok(x.powi(3)? + 2.0 * x.powi(2)? + x + 1.0)
}

/// sin(x)·exp(x) / (1 + x²)
pub fn damped(x: &Node<f64>) -> Result<Node<f64>> {
    x.sin() * x.exp() / (1.0 + x * x)
}

pub fn make_input(n: usize) -> Vec<f64> {
    (0..n).map(|i| 0.5 + 0.01 * i as f64).collect()
}

pub fn finite_diff_gradient(f: fn(&[f64]) -> f64, x: &[f64], h: f64) -> Vec<f64> {
    let mut xp = x.to_vec();
    (0..x.len())
        .map(|i| {
            let orig = xp[i];
            xp[i] = orig + h;
            let fp = f(&xp);
            xp[i] = orig - h;
            let fm = f(&xp);
            xp[i] = orig;
            (fp - fm) / (2.0 * h)
        })
        .collect()
}
