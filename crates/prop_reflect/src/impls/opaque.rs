use prop_value::chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use prop_value::coerce;
use prop_value::num_bigint::BigInt;
use prop_value::rust_decimal::Decimal;

use crate::info::{NonGenericTypeInfoCell, OpaqueInfo, TypeInfo, Typed};
use crate::ops::{ReflectMut, ReflectRef};
use crate::{FromValue, Reflect, Value};

macro_rules! impl_reflect_opaque {
    ($($ty:ty => $from:expr;)*) => {$(
        impl Typed for $ty {
            fn type_info() -> &'static TypeInfo {
                static CELL: NonGenericTypeInfoCell = NonGenericTypeInfoCell::new();
                CELL.get_or_init(|| TypeInfo::Opaque(OpaqueInfo::new::<Self>()))
            }
        }

        impl FromValue for $ty {
            #[inline]
            fn from_value(value: Value) -> Self {
                let convert: fn(&Value) -> $ty = $from;
                convert(&value)
            }
        }

        impl Reflect for $ty {
            #[inline]
            fn reflect_ref(&self) -> ReflectRef<'_> {
                ReflectRef::Opaque(self)
            }

            #[inline]
            fn reflect_mut(&mut self) -> ReflectMut<'_> {
                ReflectMut::Opaque(self)
            }

            #[inline]
            fn reflect_value(&self) -> Value {
                Value::from(<$ty as Clone>::clone(self))
            }

            #[inline]
            fn assign(&mut self, value: Value) {
                *self = <$ty as FromValue>::from_value(value);
            }

            fn set(&mut self, value: Box<dyn Reflect>) -> Result<(), Box<dyn Reflect>> {
                *self = value.take::<Self>()?;
                Ok(())
            }
        }
    )*};
}

// Unsigned and extra-wide targets narrow from the 128-bit intermediate the
// same way the signed ones do.
macro_rules! wrapping {
    ($ty:ty) => {
        |value| coerce::integer_of(value).map_or(0, |n| n as $ty)
    };
}

impl_reflect_opaque! {
    bool => |value| coerce::to_bool(value, false);
    char => |value| coerce::to_char(value, '\0');
    i8 => |value| coerce::to_i8(value, 0);
    i16 => |value| coerce::to_i16(value, 0);
    i32 => |value| coerce::to_i32(value, 0);
    i64 => |value| coerce::to_i64(value, 0);
    i128 => |value| coerce::integer_of(value).unwrap_or(0);
    isize => wrapping!(isize);
    u8 => wrapping!(u8);
    u16 => wrapping!(u16);
    u32 => wrapping!(u32);
    u64 => wrapping!(u64);
    u128 => wrapping!(u128);
    usize => wrapping!(usize);
    f32 => |value| coerce::to_f32(value, 0.0);
    f64 => |value| coerce::to_f64(value, 0.0);
    String => |value| coerce::to_string(value, "");
    Decimal => |value| coerce::to_decimal(value, Decimal::ZERO);
    BigInt => |value| coerce::to_big_int(value, BigInt::ZERO);
    NaiveDateTime => |value| coerce::to_date_time(value).unwrap_or_default();
    NaiveDate => |value| coerce::to_date(value).unwrap_or_default();
    NaiveTime => |value| coerce::to_time(value).unwrap_or_default();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::info::ReflectKind;

    #[test]
    fn assign_coerces_with_zero_defaults() {
        let mut n = 5_i32;
        n.assign(Value::from("12.9"));
        assert_eq!(n, 12);
        n.assign(Value::from("twelve"));
        assert_eq!(n, 0);

        let mut byte = 0_u8;
        byte.assign(Value::from(300));
        assert_eq!(byte, 44);

        let mut text = String::from("old");
        text.assign(Value::Null);
        assert_eq!(text, "");
        text.assign(Value::from(Decimal::new(185, 1)));
        assert_eq!(text, "18.5");
    }

    #[test]
    fn set_moves_only_same_type() {
        let mut n = 1_i64;
        assert!(n.set(Box::new(7_i64)).is_ok());
        assert_eq!(n, 7);

        let rejected = n.set(Box::new(8_i32)).unwrap_err();
        assert!(rejected.is::<i32>());
        assert_eq!(n, 7);
    }

    #[test]
    fn opaque_info() {
        let info = <Decimal as Typed>::type_info();
        assert_eq!(info.kind(), ReflectKind::Opaque);
        assert!(info.constructor().is_none());
        assert!(core::ptr::eq(info, <Decimal as Typed>::type_info()));
        assert_eq!(Decimal::ONE.reflect_value(), Value::Decimal(Decimal::ONE));
    }
}
