use crate::core::{DigitComputer, DigitError, DigitResult};
use std::f64::consts::{LN_10, LN_2};

/// 計算を許可する最大インデックスの既定値
pub const DEFAULT_MAX_INDEX: u64 = 100_000;

/// Bellardの O(n^2) 法による π の n 桁目（小数点以下）の計算
///
/// Plouffeの方法を改良したもので、桁ごとに独立して計算できる。
/// 内部状態を持たないため複数スレッドから同時に呼び出してよい。
#[derive(Debug, Clone, Copy)]
pub struct BellardDigitComputer {
    max_index: u64,
}

impl BellardDigitComputer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_index(max_index: u64) -> Self {
        Self { max_index }
    }

    pub fn max_index(&self) -> u64 {
        self.max_index
    }
}

impl Default for BellardDigitComputer {
    fn default() -> Self {
        Self {
            max_index: DEFAULT_MAX_INDEX,
        }
    }
}

impl DigitComputer for BellardDigitComputer {
    fn compute(&self, index: u64) -> DigitResult<u8> {
        if index == 0 {
            return Err(DigitError::compute_failure(
                index,
                "digit indices start at 1",
            ));
        }
        if index > self.max_index {
            return Err(DigitError::compute_failure(
                index,
                format!("index exceeds supported maximum {}", self.max_index),
            ));
        }

        Ok(nth_digit(index))
    }
}

/// 小数点以下 n 桁目から始まる9桁窓の先頭桁を返す
fn nth_digit(n: u64) -> u8 {
    let terms = ((n + 20) as f64 * LN_10 / LN_2) as u64;
    let limit = 2 * terms;
    let mut sum = 0.0_f64;

    let mut a = 3;
    while a <= limit {
        // av = a^vmax <= 2N となる最大のべき
        let mut av = a;
        let mut vmax: i64 = 1;
        while av * a <= limit {
            av *= a;
            vmax += 1;
        }

        let mut s = 0;
        let mut num = 1;
        let mut den = 1;
        let mut v: i64 = 0;
        let mut kq = 1;
        let mut kq2 = 1;

        for k in 1..=terms {
            let mut t = k;
            if kq >= a {
                loop {
                    t /= a;
                    v -= 1;
                    if t % a != 0 {
                        break;
                    }
                }
                kq = 0;
            }
            kq += 1;
            num = mul_mod(num, t, av);

            let mut t = 2 * k - 1;
            if kq2 >= a {
                if kq2 == a {
                    loop {
                        t /= a;
                        v += 1;
                        if t % a != 0 {
                            break;
                        }
                    }
                }
                kq2 -= a;
            }
            den = mul_mod(den, t, av);
            kq2 += 2;

            if v > 0 {
                let mut t = inv_mod(den, av);
                t = mul_mod(t, num, av);
                t = mul_mod(t, k, av);
                for _ in v..vmax {
                    t = mul_mod(t, a, av);
                }
                s += t;
                if s >= av {
                    s -= av;
                }
            }
        }

        let t = pow_mod(10, n - 1, av);
        s = mul_mod(s, t, av);
        sum = (sum + s as f64 / av as f64) % 1.0;

        a = next_prime(a);
    }

    ((sum * 1e9 / 1e8) as u8).min(9)
}

fn mul_mod(a: u64, b: u64, m: u64) -> u64 {
    ((a as u128 * b as u128) % m as u128) as u64
}

/// x の mod y における逆元（x と y は互いに素）
fn inv_mod(x: u64, y: u64) -> u64 {
    let (mut u, mut v) = (x as i64, y as i64);
    let (mut c, mut a) = (1_i64, 0_i64);

    loop {
        let q = v / u;

        let t = c;
        c = a - q * c;
        a = t;

        let t = u;
        u = v - q * u;
        v = t;

        if u == 0 {
            break;
        }
    }

    a %= y as i64;
    if a < 0 {
        a += y as i64;
    }
    a as u64
}

fn pow_mod(base: u64, mut exp: u64, m: u64) -> u64 {
    let mut result = 1 % m;
    let mut base = base % m;

    while exp > 0 {
        if exp & 1 == 1 {
            result = mul_mod(result, base, m);
        }
        exp >>= 1;
        base = mul_mod(base, base, m);
    }
    result
}

fn is_prime(n: u64) -> bool {
    if n % 2 == 0 {
        return n == 2;
    }
    let mut i = 3;
    while i * i <= n {
        if n % i == 0 {
            return false;
        }
        i += 2;
    }
    true
}

fn next_prime(mut n: u64) -> u64 {
    loop {
        n += 1;
        if is_prime(n) {
            return n;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PI_FRACTION: &str = "14159265358979323846264338327950288419716939937510";

    #[test]
    fn test_first_digits_of_pi() {
        let computer = BellardDigitComputer::new();

        let digits: String = (1..=PI_FRACTION.len() as u64)
            .map(|index| char::from(b'0' + computer.compute(index).unwrap()))
            .collect();

        assert_eq!(digits, PI_FRACTION);
    }

    #[test]
    fn test_index_zero_is_compute_failure() {
        let computer = BellardDigitComputer::new();

        assert!(matches!(
            computer.compute(0),
            Err(DigitError::ComputeFailure { index: 0, .. })
        ));
    }

    #[test]
    fn test_index_above_maximum_is_compute_failure() {
        let computer = BellardDigitComputer::with_max_index(10);

        assert_eq!(computer.max_index(), 10);
        assert!(computer.compute(10).is_ok());
        assert!(matches!(
            computer.compute(11),
            Err(DigitError::ComputeFailure { index: 11, .. })
        ));
    }

    #[test]
    fn test_modular_helpers() {
        assert_eq!(mul_mod(7, 8, 5), 1);
        assert_eq!(pow_mod(10, 0, 7), 1);
        assert_eq!(pow_mod(10, 3, 7), 6);
        assert_eq!(pow_mod(3, 4, 1), 0);
        assert_eq!(inv_mod(3, 7), 5);
        assert_eq!(mul_mod(inv_mod(10, 27), 10, 27), 1);
    }

    #[test]
    fn test_prime_helpers() {
        assert!(is_prime(3));
        assert!(is_prime(97));
        assert!(!is_prime(91));
        assert!(!is_prime(100));
        assert_eq!(next_prime(3), 5);
        assert_eq!(next_prime(7), 11);
        assert_eq!(next_prime(23), 29);
    }

    #[test]
    fn test_concurrent_calls_agree() {
        let computer = BellardDigitComputer::new();
        let expected: Vec<u8> = (1..=20).map(|index| computer.compute(index).unwrap()).collect();

        std::thread::scope(|scope| {
            let handles: Vec<_> = (0..4)
                .map(|_| {
                    scope.spawn(|| {
                        (1..=20)
                            .map(|index| computer.compute(index).unwrap())
                            .collect::<Vec<u8>>()
                    })
                })
                .collect();

            for handle in handles {
                assert_eq!(handle.join().unwrap(), expected);
            }
        });
    }
}
