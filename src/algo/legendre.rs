//! Exact coefficients of the shifted Legendre polynomials.
//!
//! P*_n(x) = Σ_k table(n, k)·x^k, with
//!   table(n, k) = −table(n−1, k)·(n+k)/(n−k)   for k < n,
//!   table(n, n) = −table(n, n−1)·2/n.
//! Every division is exact. Rows are appended to one process-wide table
//! and never change afterwards.

use std::sync::{Arc, OnceLock};

use num_bigint::BigInt;
use parking_lot::Mutex;

type Row = Arc<[BigInt]>;

static ROWS: OnceLock<Mutex<Vec<Row>>> = OnceLock::new();

fn next_row(previous: &[BigInt]) -> Row {
    let n = previous.len();
    let mut row: Vec<BigInt> = previous
        .iter()
        .enumerate()
        .map(|(k, v)| -(v * (n + k)) / (n - k))
        .collect();
    let last = -(&row[n - 1] * 2u32) / n;
    row.push(last);
    row.into()
}

/// Row `n` of the table: the `n + 1` integer coefficients of P*_n.
pub(crate) fn shifted_legendre(n: usize) -> Row {
    let rows = ROWS.get_or_init(|| Mutex::new(vec![Arc::from(vec![BigInt::from(1)])]));
    let mut rows = rows.lock();
    while rows.len() <= n {
        let row = next_row(&rows[rows.len() - 1]);
        rows.push(row);
    }
    Arc::clone(&rows[n])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ints(row: &[BigInt]) -> Vec<i64> {
        row.iter().map(|v| i64::try_from(v).unwrap()).collect()
    }

    #[test]
    fn low_order_rows() {
        assert_eq!(ints(&shifted_legendre(0)), [1]);
        assert_eq!(ints(&shifted_legendre(1)), [-1, 2]);
        assert_eq!(ints(&shifted_legendre(2)), [1, -6, 6]);
        assert_eq!(ints(&shifted_legendre(3)), [-1, 12, -30, 20]);
    }

    #[test]
    fn binomial_closed_form() {
        // table(n, k) = (−1)^(n+k)·C(n, k)·C(n+k, k)
        fn binomial(n: u64, k: u64) -> BigInt {
            (0..k).fold(BigInt::from(1), |acc, i| acc * (n - i) / (i + 1))
        }
        let n = 36;
        let row = shifted_legendre(n);
        for (k, v) in row.iter().enumerate() {
            let k = k as u64;
            let mut expected = binomial(n as u64, k) * binomial(n as u64 + k, k);
            if (n as u64 + k) % 2 == 1 {
                expected = -expected;
            }
            assert_eq!(v, &expected, "k = {k}");
        }
    }

    #[test]
    fn rows_are_shared() {
        let a = shifted_legendre(10);
        let b = shifted_legendre(10);
        assert!(Arc::ptr_eq(&a, &b));
    }
}
