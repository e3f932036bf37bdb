//! Core types for Bessel function computation.

use core::fmt;

/// The four Bessel families evaluated by the dispatcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Function {
    /// Bessel function of the first kind, J.
    J,
    /// Bessel function of the second kind, Y.
    Y,
    /// Modified Bessel function of the first kind, I.
    I,
    /// Modified Bessel function of the second kind, K.
    K,
}

impl fmt::Display for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Function::J => "J",
            Function::Y => "Y",
            Function::I => "I",
            Function::K => "K",
        };
        f.write_str(name)
    }
}

/// Evaluation strategy selected by the dispatcher for a reduced argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kernel {
    /// Ascending power series about z = 0.
    PowerSeries,
    /// Miller's backward recurrence with a fixed, fitted iteration count.
    MillerBackward,
    /// Asymptotic Hankel expansion in 1/z.
    Hankel,
    /// Yoshida's rational approximation of K.
    YoshidaPade,
    /// Continued fraction plus recurrence from a low reference order.
    Recurrence,
    /// 45° rotation onto the conjugate-order modified (or ordinary) problem.
    Rotation,
}

/// Kind of Hankel function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HankelKind {
    /// H^(1), Hankel function of the first kind.
    First,
    /// H^(2), Hankel function of the second kind.
    Second,
}

/// Error type for Bessel function computation.
///
/// Numerical non-convergence is not an error: it is reported by a NaN
/// result, the way every other exceptional floating-point value is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Error {
    /// |ν| exceeds the evaluator's maximum supported order, or ν is not finite.
    OrderOutOfRange,
    /// A threshold in the evaluator configuration is unusable; names the field.
    InvalidThresholds(&'static str),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::OrderOutOfRange => {
                write!(f, "order out of supported range")
            }
            Error::InvalidThresholds(field) => {
                write!(f, "invalid threshold configuration: {field}")
            }
        }
    }
}

impl core::error::Error for Error {}
