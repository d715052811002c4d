//! `var()` and `attr()` substitution.
//!
//! [CSS Custom Properties for Cascading Variables Module Level 1 § 3](https://www.w3.org/TR/css-variables-1/#using-variables)
//!
//! "If a property value contains one or more `var()` functions, and those
//! functions are syntactically valid, the entire property's grammar must be
//! assumed to be valid at parse time. It is only syntax-checked at
//! computed-value time, after `var()` functions have been substituted."
//!
//! Values that matched [`crate::syntax::Match::Pending`] are substituted here
//! and translated again, after which they can be re-validated.

use std::collections::HashMap;

use crate::error::{Result, ValueError};
use crate::lexer::{LexicalUnit, parse_units};
use crate::units::CssUnit;

/// Maximum substitution depth to prevent infinite recursion from cycles.
///
/// [§ 2.3 Resolving Dependency Cycles](https://www.w3.org/TR/css-variables-1/#cycles)
///
/// "If there is a cycle in the dependency graph, all the custom properties
/// in the cycle are invalid at computed-value time."
const MAX_SUBSTITUTION_DEPTH: u32 = 32;

/// Custom property values and element attributes available to substitution.
#[derive(Debug, Clone, Default)]
pub struct SubstitutionContext {
    custom_properties: HashMap<String, Vec<LexicalUnit>>,
    attributes: HashMap<String, String>,
}

impl SubstitutionContext {
    /// An empty context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Define a custom property from its value text.
    ///
    /// # Errors
    ///
    /// Returns [`ValueError::Syntax`] when the text does not scan.
    pub fn set_property(&mut self, name: &str, text: &str) -> Result<()> {
        let units = parse_units(text)?;
        let _ = self.custom_properties.insert(name.to_string(), units);
        Ok(())
    }

    /// Define an element attribute.
    pub fn set_attribute(&mut self, name: &str, value: &str) {
        let _ = self
            .attributes
            .insert(name.to_ascii_lowercase(), value.to_string());
    }

    /// Replace every `var()` and `attr()` in `units`.
    ///
    /// # Errors
    ///
    /// Returns [`ValueError::Evaluation`] when a reference has neither a value
    /// nor a fallback, or when substitution recurses too deeply (a cycle).
    pub fn substitute_units(&self, units: &[LexicalUnit]) -> Result<Vec<LexicalUnit>> {
        self.substitute(units, 0)
    }

    fn substitute(&self, units: &[LexicalUnit], depth: u32) -> Result<Vec<LexicalUnit>> {
        // [§ 2.3](https://www.w3.org/TR/css-variables-1/#cycles)
        // Depth limit as cycle detection approximation.
        if depth > MAX_SUBSTITUTION_DEPTH {
            return Err(ValueError::evaluation(
                "substitution depth exceeded (reference cycle)",
            ));
        }

        let mut result = Vec::with_capacity(units.len());
        for unit in units {
            match unit {
                LexicalUnit::Var { name, fallback } => {
                    // "If the value of the custom property named by the first
                    // argument to the var() function is anything but the
                    // initial value, replace the var() function by the value
                    // of the corresponding custom property."
                    if let Some(value) = self.custom_properties.get(name) {
                        result.extend(self.substitute(value, depth + 1)?);
                    } else if let Some(fallback) = fallback {
                        result.extend(self.substitute(fallback, depth + 1)?);
                    } else {
                        // "Otherwise, the property containing the var() function
                        // is invalid at computed-value time."
                        return Err(ValueError::evaluation(format!(
                            "{name} is not defined and var() has no fallback"
                        )));
                    }
                }
                LexicalUnit::Attr {
                    name,
                    type_or_unit,
                    fallback,
                } => {
                    let converted = self
                        .attributes
                        .get(&name.to_ascii_lowercase())
                        .and_then(|value| attr_units(value, type_or_unit.as_deref()));
                    match (converted, fallback) {
                        (Some(units), _) => result.extend(units),
                        (None, Some(fallback)) => {
                            result.extend(self.substitute(fallback, depth + 1)?);
                        }
                        (None, None) => {
                            return Err(ValueError::evaluation(format!(
                                "attribute '{name}' is missing or invalid and attr() has no fallback"
                            )));
                        }
                    }
                }
                LexicalUnit::Function { name, params } => {
                    result.push(LexicalUnit::Function {
                        name: name.clone(),
                        params: self.substitute(params, depth + 1)?,
                    });
                }
                LexicalUnit::SubExpression(inner) => {
                    result.push(LexicalUnit::SubExpression(self.substitute(inner, depth + 1)?));
                }
                LexicalUnit::Brackets(inner) => {
                    result.push(LexicalUnit::Brackets(self.substitute(inner, depth + 1)?));
                }
                other => result.push(other.clone()),
            }
        }
        Ok(result)
    }
}

/// [CSS Values 5 § 7.7](https://www.w3.org/TR/css-values-5/#attr-notation)
///
/// Convert an attribute value according to the `attr()` type. `None` means
/// the value does not parse as that type.
fn attr_units(value: &str, type_or_unit: Option<&str>) -> Option<Vec<LexicalUnit>> {
    let number = || value.trim().parse::<f64>().ok();
    let unit = match type_or_unit {
        None | Some("string") => LexicalUnit::String {
            value: value.to_string(),
            quote: '"',
        },
        Some("ident") => LexicalUnit::Ident(value.trim().to_string()),
        Some("url") => LexicalUnit::Uri(value.trim().to_string()),
        Some("number" | "integer") => {
            let value = number()?;
            LexicalUnit::Number {
                value,
                integer: value.fract() == 0.0,
            }
        }
        Some("%") => LexicalUnit::Percentage(number()?),
        Some(other) => match CssUnit::from_unit_text(other) {
            CssUnit::Invalid => return parse_units(value).ok(),
            unit => LexicalUnit::Dimension {
                value: number()?,
                unit,
                unit_text: unit.as_str().to_string(),
            },
        },
    };
    Some(vec![unit])
}
