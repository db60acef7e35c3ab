use sdk::cosmwasm_std::{Decimal, Uint128, Uint256};

use crate::error::{Error, Result};

/// Whether `collateral` valued at `price` falls short of `debt` times `ratio`
///
/// The comparison is exact, both sides are widened to 256 bits before multiplying.
pub fn is_below_ratio(collateral: Uint128, price: Decimal, debt: Uint128, ratio: Decimal) -> bool {
    collateral.full_mul(price.atomics()) < debt.full_mul(ratio.atomics())
}

/// `amount * part / whole` rounded down
pub fn proportion(amount: Uint128, part: Uint128, whole: Uint128) -> Result<Uint128> {
    if whole.is_zero() {
        return Err(Error::DivisionByZero(amount.to_string()));
    }
    Uint128::try_from(amount.full_mul(part) / Uint256::from(whole)).map_err(Into::into)
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use sdk::cosmwasm_std::{Decimal, Uint128};

    use crate::error::Error;

    fn dec(value: &str) -> Decimal {
        Decimal::from_str(value).expect("valid decimal")
    }

    #[test]
    fn below_ratio() {
        let collateral = Uint128::new(3);
        let debt = Uint128::new(16_000);
        let ratio = dec("1.5");
        assert!(!super::is_below_ratio(collateral, dec("8000"), debt, ratio));
        assert!(super::is_below_ratio(collateral, dec("7999.99"), debt, ratio));
        // exactly at the ratio is safe
        assert!(!super::is_below_ratio(
            Uint128::new(3),
            dec("1"),
            Uint128::new(2),
            ratio
        ));
    }

    #[test]
    fn below_ratio_no_overflow() {
        assert!(!super::is_below_ratio(
            Uint128::MAX,
            Decimal::MAX,
            Uint128::MAX,
            Decimal::MAX
        ));
        assert!(super::is_below_ratio(
            Uint128::MAX - Uint128::one(),
            Decimal::MAX,
            Uint128::MAX,
            Decimal::MAX
        ));
    }

    #[test]
    fn proportion() {
        assert_eq!(
            Ok(Uint128::new(5_333)),
            super::proportion(Uint128::new(16_000), Uint128::one(), Uint128::new(3))
        );
        assert_eq!(
            Ok(Uint128::MAX),
            super::proportion(Uint128::MAX, Uint128::MAX, Uint128::MAX)
        );
        assert_eq!(
            Err(Error::DivisionByZero("7".into())),
            super::proportion(Uint128::new(7), Uint128::one(), Uint128::zero())
        );
    }
}
