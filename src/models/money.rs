// src/models/money.rs

use std::{fmt, str::FromStr};

use rust_decimal::Decimal;
use serde::{Serialize, Serializer};
use sqlx::{
    encode::IsNull, error::BoxDynError, sqlite::SqliteTypeInfo, Database, Decode, Encode, Sqlite,
    Type,
};

/// Valor monetário em pesos, sempre positivo e com no máximo 2 casas.
///
/// O SQLite não tem tipo decimal; guardamos o texto exato (`"1500.25"`)
/// para não perder centavos em arredondamento de ponto flutuante.
/// Sempre com 2 casas: `"20"` vira `20.00`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Amount(Decimal);

// No JSON vai como string ("1500.50"), nunca como f64.
impl Serialize for Amount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AmountError {
    #[error("Enter a valid amount.")]
    Invalid,
    #[error("Amount must be greater than zero.")]
    NotPositive,
    #[error("Amount can have at most 2 decimal places.")]
    TooPrecise,
}

impl FromStr for Amount {
    type Err = AmountError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = Decimal::from_str(s.trim()).map_err(|_| AmountError::Invalid)?;

        if value <= Decimal::ZERO {
            return Err(AmountError::NotPositive);
        }
        let mut value = value.normalize();
        if value.scale() > 2 {
            return Err(AmountError::TooPrecise);
        }
        value.rescale(2);
        Ok(Amount(value))
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// --- Mapeamento sqlx: TEXT <-> Amount ---

impl Type<Sqlite> for Amount {
    fn type_info() -> SqliteTypeInfo {
        <String as Type<Sqlite>>::type_info()
    }

    fn compatible(ty: &SqliteTypeInfo) -> bool {
        <String as Type<Sqlite>>::compatible(ty)
    }
}

impl<'q> Encode<'q, Sqlite> for Amount {
    fn encode_by_ref(
        &self,
        buf: &mut <Sqlite as Database>::ArgumentBuffer<'q>,
    ) -> Result<IsNull, BoxDynError> {
        <String as Encode<'q, Sqlite>>::encode(self.0.to_string(), buf)
    }
}

impl<'r> Decode<'r, Sqlite> for Amount {
    fn decode(value: <Sqlite as Database>::ValueRef<'r>) -> Result<Self, BoxDynError> {
        let text = <&str as Decode<'r, Sqlite>>::decode(value)?;
        Ok(Amount(Decimal::from_str(text)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_peso_amounts() {
        let amount: Amount = "1500.50".parse().unwrap();
        assert_eq!(amount.to_string(), "1500.50");
        assert!(" 20 ".parse::<Amount>().is_ok());
        // zeros à direita não contam como casas decimais
        let amount: Amount = "10.500".parse().unwrap();
        assert_eq!(amount.to_string(), "10.50");
        let amount: Amount = " 20 ".parse().unwrap();
        assert_eq!(amount.to_string(), "20.00");
    }

    #[test]
    fn serializes_as_exact_text() {
        let amount: Amount = "1500.50".parse().unwrap();
        assert_eq!(serde_json::to_value(amount).unwrap(), serde_json::json!("1500.50"));

        let big: Amount = "12345678901234567.89".parse().unwrap();
        assert_eq!(serde_json::to_string(&big).unwrap(), "\"12345678901234567.89\"");
    }

    #[test]
    fn rejects_invalid_amounts() {
        assert_eq!("abc".parse::<Amount>(), Err(AmountError::Invalid));
        assert_eq!("".parse::<Amount>(), Err(AmountError::Invalid));
        assert_eq!("0".parse::<Amount>(), Err(AmountError::NotPositive));
        assert_eq!("-5".parse::<Amount>(), Err(AmountError::NotPositive));
        assert_eq!("1.234".parse::<Amount>(), Err(AmountError::TooPrecise));
    }
}
