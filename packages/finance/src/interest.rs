use sdk::cosmwasm_std::{Decimal, Decimal256, Uint128, Uint256};

use crate::{
    duration::Duration,
    error::{Error, Result},
};

/// The whole tokens minted by an accrual step and the fraction carried to the next one
///
/// The carried `accum` is kept in token-nanoseconds-per-year units,
/// i.e. it is always less than the number of nanoseconds in a year.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Accrual {
    pub minted: Uint128,
    pub accum: Decimal256,
}

/// Accrue `annual_rate` on `supply` over `period` starting from the carried `accum`
///
/// The computation is done on the 18-decimal atomics of the rate and the
/// carried remainder so no precision is lost between steps. Splitting a
/// period into any number of sub-periods mints the same total.
pub fn accrue(
    annual_rate: Decimal,
    supply: Uint128,
    period: Duration,
    accum: Decimal256,
) -> Result<Accrual> {
    let year = year_in_atomics();
    let carried = accum.atomics();
    if carried >= year {
        return Err(Error::broken_invariant_err::<Accrual>(
            "the carried accumulator exceeds a year",
        ));
    }

    let acc = Uint256::from(annual_rate.atomics())
        .checked_mul(Uint256::from(supply))?
        .checked_mul(Uint256::from(period.nanos()))?
        .checked_add(carried)?;

    let minted = acc / year;
    let remainder = acc - minted * year;

    Ok(Accrual {
        minted: Uint128::try_from(minted)?,
        accum: Decimal256::new(remainder),
    })
}

fn year_in_atomics() -> Uint256 {
    Uint256::from(Duration::YEAR.nanos())
        * Uint256::from(10u128.pow(Decimal256::DECIMAL_PLACES))
}
