use std::ops::{Add, AddAssign, Div, Mul, MulAssign, Neg, Sub, SubAssign};

use crate::error::Result;
use crate::float::Float;
use crate::node::Node;
use crate::ops;

// ──────────────────────────────────────────────
//  Node ∘ Node, by value and by reference
// ──────────────────────────────────────────────

macro_rules! impl_node_binop {
    ($Trait:ident, $method:ident, $func:path, $Out:ty) => {
        impl<F: Float> $Trait<&Node<F>> for &Node<F> {
            type Output = $Out;
            #[inline]
            fn $method(self, rhs: &Node<F>) -> $Out {
                $func(self, rhs)
            }
        }

        impl<F: Float> $Trait<Node<F>> for &Node<F> {
            type Output = $Out;
            #[inline]
            fn $method(self, rhs: Node<F>) -> $Out {
                $func(self, &rhs)
            }
        }

        impl<F: Float> $Trait<&Node<F>> for Node<F> {
            type Output = $Out;
            #[inline]
            fn $method(self, rhs: &Node<F>) -> $Out {
                $func(&self, rhs)
            }
        }

        impl<F: Float> $Trait<Node<F>> for Node<F> {
            type Output = $Out;
            #[inline]
            fn $method(self, rhs: Node<F>) -> $Out {
                $func(&self, &rhs)
            }
        }
    };
}

impl_node_binop!(Add, add, ops::add, Node<F>);
impl_node_binop!(Sub, sub, ops::sub, Node<F>);
impl_node_binop!(Mul, mul, ops::mul, Node<F>);
// Division can fail, so `/` yields a `Result`: `(a / b)?`.
impl_node_binop!(Div, div, ops::div, Result<Node<F>>);

impl<F: Float> Neg for Node<F> {
    type Output = Node<F>;
    #[inline]
    fn neg(self) -> Node<F> {
        ops::neg(&self)
    }
}

impl<F: Float> Neg for &Node<F> {
    type Output = Node<F>;
    #[inline]
    fn neg(self) -> Node<F> {
        ops::neg(self)
    }
}

macro_rules! impl_node_assign {
    ($Trait:ident, $method:ident, $func:path) => {
        impl<F: Float> $Trait<Node<F>> for Node<F> {
            #[inline]
            fn $method(&mut self, rhs: Node<F>) {
                *self = $func(self, &rhs);
            }
        }

        impl<F: Float> $Trait<&Node<F>> for Node<F> {
            #[inline]
            fn $method(&mut self, rhs: &Node<F>) {
                *self = $func(self, rhs);
            }
        }
    };
}

impl_node_assign!(AddAssign, add_assign, ops::add);
impl_node_assign!(SubAssign, sub_assign, ops::sub);
impl_node_assign!(MulAssign, mul_assign, ops::mul);

// ──────────────────────────────────────────────
//  Mixed ops with primitive floats
// ──────────────────────────────────────────────

// The scalar is always lifted to a leaf with `Node::constant` first, on
// either side of the operator.
macro_rules! impl_scalar_binop {
    ($f:ty, $Trait:ident, $method:ident, $func:path, $Out:ty) => {
        impl $Trait<$f> for Node<$f> {
            type Output = $Out;
            #[inline]
            fn $method(self, rhs: $f) -> $Out {
                $func(&self, &Node::constant(rhs))
            }
        }

        impl $Trait<$f> for &Node<$f> {
            type Output = $Out;
            #[inline]
            fn $method(self, rhs: $f) -> $Out {
                $func(self, &Node::constant(rhs))
            }
        }

        impl $Trait<Node<$f>> for $f {
            type Output = $Out;
            #[inline]
            fn $method(self, rhs: Node<$f>) -> $Out {
                $func(&Node::constant(self), &rhs)
            }
        }

        impl $Trait<&Node<$f>> for $f {
            type Output = $Out;
            #[inline]
            fn $method(self, rhs: &Node<$f>) -> $Out {
                $func(&Node::constant(self), rhs)
            }
        }
    };
}

macro_rules! impl_scalar_ops {
    ($f:ty) => {
        impl_scalar_binop!($f, Add, add, ops::add, Node<$f>);
        impl_scalar_binop!($f, Sub, sub, ops::sub, Node<$f>);
        impl_scalar_binop!($f, Mul, mul, ops::mul, Node<$f>);
        impl_scalar_binop!($f, Div, div, ops::div, Result<Node<$f>>);

        impl AddAssign<$f> for Node<$f> {
            #[inline]
            fn add_assign(&mut self, rhs: $f) {
                *self = ops::add(self, &Node::constant(rhs));
            }
        }

        impl SubAssign<$f> for Node<$f> {
            #[inline]
            fn sub_assign(&mut self, rhs: $f) {
                *self = ops::sub(self, &Node::constant(rhs));
            }
        }

        impl MulAssign<$f> for Node<$f> {
            #[inline]
            fn mul_assign(&mut self, rhs: $f) {
                *self = ops::mul(self, &Node::constant(rhs));
            }
        }
    };
}

impl_scalar_ops!(f32);
impl_scalar_ops!(f64);
