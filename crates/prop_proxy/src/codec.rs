//! JSON structural conversion.
//!
//! ```
//! use prop_proxy::codec;
//! use prop_reflect::Value;
//!
//! let value: Value = codec::decode(r#"{"name":"张三","tags":["a","b"]}"#)?;
//! assert_eq!(value.get("name"), Some(&Value::from("张三")));
//! assert_eq!(codec::encode(&value)?, r#"{"name":"张三","tags":["a","b"]}"#);
//!
//! let tags: Vec<String> = codec::convert(value.get("tags").unwrap())?;
//! assert_eq!(tags, ["a", "b"]);
//! # Ok::<(), prop_proxy::CodecError>(())
//! ```

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CodecError {
    #[error("json conversion failed")]
    Json(#[from] serde_json::Error),
}

pub fn encode<T: Serialize + ?Sized>(value: &T) -> Result<String, CodecError> {
    Ok(serde_json::to_string(value)?)
}

pub fn encode_pretty<T: Serialize + ?Sized>(value: &T) -> Result<String, CodecError> {
    Ok(serde_json::to_string_pretty(value)?)
}

pub fn decode<T: DeserializeOwned>(text: &str) -> Result<T, CodecError> {
    Ok(serde_json::from_str(text)?)
}

/// Re-reads `value` as another type through its JSON tree.
pub fn convert<T, U>(value: &T) -> Result<U, CodecError>
where
    T: Serialize + ?Sized,
    U: DeserializeOwned,
{
    let tree = serde_json::to_value(value)?;
    Ok(serde_json::from_value(tree)?)
}

#[cfg(test)]
mod tests {
    use prop_reflect::Value;

    use super::*;

    #[test]
    fn pretty_output_is_indented() {
        let value = Value::from(vec![1, 2]);
        assert_eq!(encode_pretty(&value).unwrap(), "[\n  1,\n  2\n]");
    }

    #[test]
    fn malformed_text_is_an_error() {
        let err = decode::<Value>("{").unwrap_err();
        assert!(matches!(err, CodecError::Json(_)));
    }

    #[test]
    fn convert_reshapes() {
        let value: Value = [("x", Value::from(1)), ("y", Value::Null)].into_iter().collect();
        let map: std::collections::BTreeMap<String, Option<i32>> = convert(&value).unwrap();
        assert_eq!(map["x"], Some(1));
        assert_eq!(map["y"], None);
    }
}
