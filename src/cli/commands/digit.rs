use crate::core::DigitComputer;
use crate::digit_algorithm::BellardDigitComputer;
use anyhow::Result;

/// Compute a single digit on the current thread
pub fn execute_digit(index: u64) -> Result<u8> {
    let digit = BellardDigitComputer::new().compute(index)?;
    println!("{index}: {digit}");
    Ok(digit)
}
