// 2022-2024 (c) Copyright Contributors to the GOSH DAO. All rights reserved.
//

//! Argument validation shared by every mutating call.
//!
//! A call's dynamic arguments are wrapped together with the call site;
//! the accessors check arity, type and domain rules and produce errors
//! whose text addresses the failing position. Nothing here mutates state,
//! so a setter can validate all of its arguments up front and only then
//! write any field.

use serde_json::Map;
use serde_json::Value;

use crate::error::CallSite;
use crate::error::ConfigError;

/// Renders a dynamic argument for error text: strings unquoted, any other
/// JSON value in its display form.
pub(crate) fn inspect(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

/// Positional arguments of one call.
pub(crate) struct CallArgs<'a> {
    call: CallSite,
    args: &'a [Value],
}

impl<'a> CallArgs<'a> {
    pub fn new(call: CallSite, args: &'a [Value]) -> Self {
        Self { call, args }
    }

    pub fn len(&self) -> usize {
        self.args.len()
    }

    /// Arity gate: `min..=max` positional arguments.
    pub fn expect_arity(&self, min: usize, max: usize) -> Result<(), ConfigError> {
        if self.args.len() < min {
            return Err(ConfigError::TooFewArgs { call: self.call, min, given: self.args.len() });
        }
        if self.args.len() > max {
            return Err(ConfigError::TooManyArgs { call: self.call, max, given: self.args.len() });
        }
        Ok(())
    }

    /// Type failure at `position`, echoing the given value.
    pub fn wrong_type(&self, position: usize) -> ConfigError {
        ConfigError::WrongType {
            call: self.call,
            position,
            given: inspect(&self.args[position]),
        }
    }

    /// Domain-rule failure at `position` with the rule text verbatim.
    pub fn bad_value(&self, position: usize, reason: impl Into<String>) -> ConfigError {
        ConfigError::BadValue { call: self.call, position, reason: reason.into() }
    }

    pub fn value(&self, position: usize) -> &'a Value {
        &self.args[position]
    }

    pub fn string(&self, position: usize) -> Result<&'a str, ConfigError> {
        match self.value(position) {
            Value::String(text) => Ok(text.as_str()),
            _ => Err(self.wrong_type(position)),
        }
    }

    /// A string with at least one character; `what` names the parameter in
    /// the rule text.
    pub fn non_empty_string(&self, position: usize, what: &str) -> Result<&'a str, ConfigError> {
        let text = self.string(position)?;
        if text.is_empty() {
            return Err(self.bad_value(position, format!("{what} cannot be empty")));
        }
        Ok(text)
    }

    pub fn boolean(&self, position: usize) -> Result<bool, ConfigError> {
        match self.value(position) {
            Value::Bool(flag) => Ok(*flag),
            _ => Err(self.wrong_type(position)),
        }
    }

    /// A non-negative integer.
    pub fn unsigned(&self, position: usize) -> Result<u64, ConfigError> {
        self.value(position).as_u64().ok_or_else(|| self.wrong_type(position))
    }

    /// An integer, for closed numeric enumerations.
    pub fn integer(&self, position: usize) -> Result<i64, ConfigError> {
        self.value(position).as_i64().ok_or_else(|| self.wrong_type(position))
    }

    /// Any number.
    pub fn number(&self, position: usize) -> Result<f64, ConfigError> {
        self.value(position).as_f64().ok_or_else(|| self.wrong_type(position))
    }

    /// A service port: integral, within range, and non-zero.
    pub fn port(&self, position: usize) -> Result<u16, ConfigError> {
        let raw = self.unsigned(position)?;
        let port = u16::try_from(raw).map_err(|_| self.wrong_type(position))?;
        if port == 0 {
            return Err(self.bad_value(position, "port number cannot be zero"));
        }
        Ok(port)
    }

    pub fn object(&self, position: usize) -> Result<&'a Map<String, Value>, ConfigError> {
        match self.value(position) {
            Value::Object(map) => Ok(map),
            _ => Err(self.wrong_type(position)),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn call() -> CallSite {
        CallSite::new("Entity", "method")
    }

    #[test]
    fn arity_bounds_are_reported_separately() {
        let args = [json!(1)];
        let checked = CallArgs::new(call(), &args);
        let err = checked.expect_arity(2, 3).unwrap_err();
        assert_eq!(err.to_string(), "Entity method: Needs 2 args but given 1");
        let err = checked.expect_arity(0, 0).unwrap_err();
        assert_eq!(err.to_string(), "Entity method: Takes 0 args but given 1");
        assert!(checked.expect_arity(1, 2).is_ok());
    }

    #[test]
    fn inspect_renders_strings_unquoted() {
        assert_eq!(inspect(&json!("abc")), "abc");
        assert_eq!(inspect(&json!(123)), "123");
        assert_eq!(inspect(&json!(0.3)), "0.3");
        assert_eq!(inspect(&json!(true)), "true");
        assert_eq!(inspect(&json!({ "sink": 1 })), "{\"sink\":1}");
    }

    #[test]
    fn port_distinguishes_type_and_rule_failures() {
        let args = [json!("abc"), json!(0), json!(987), json!(70000)];
        let checked = CallArgs::new(call(), &args);
        let err = checked.port(0).unwrap_err();
        assert!(err.to_string().contains("given abc"), "{err}");
        let err = checked.port(1).unwrap_err();
        assert!(err.to_string().contains("port number cannot be zero"), "{err}");
        assert_eq!(checked.port(2).unwrap(), 987);
        let err = checked.port(3).unwrap_err();
        assert!(err.to_string().contains("given 70000"), "{err}");
    }

    #[test]
    fn non_empty_string_names_the_parameter() {
        let args = [json!("")];
        let checked = CallArgs::new(call(), &args);
        let err = checked.non_empty_string(0, "hostname").unwrap_err();
        assert_eq!(err.to_string(), "Entity method: Wrong argument at 0. hostname cannot be empty");
    }
}
