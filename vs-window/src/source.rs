use crate::ConfigError;

/// A parsed `item in collection [track by expr]` repeat source.
///
/// The engine never evaluates these names; they are validated at setup so a malformed template
/// fails fast instead of producing an empty window.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SourceExpression {
    pub item: String,
    pub collection: String,
    pub track_by: Option<String>,
}

impl SourceExpression {
    pub fn parse(expr: &str) -> Result<Self, ConfigError> {
        let tokens: Vec<&str> = expr.split_whitespace().collect();
        if tokens.is_empty() {
            return Err(ConfigError::EmptySourceExpression);
        }
        let malformed = || ConfigError::MalformedSourceExpression(expr.trim().to_owned());
        if tokens.len() < 3 || tokens[1] != "in" {
            return Err(malformed());
        }

        let n = tokens.len();
        let (rhs, track_by) = if n >= 6 && tokens[n - 3] == "track" && tokens[n - 2] == "by" {
            (&tokens[2..n - 3], Some(tokens[n - 1].to_owned()))
        } else {
            (&tokens[2..], None)
        };
        if rhs.is_empty() || rhs[0] == "track" {
            return Err(malformed());
        }

        Ok(Self {
            item: tokens[0].to_owned(),
            collection: rhs.join(" "),
            track_by,
        })
    }
}

impl core::str::FromStr for SourceExpression {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl core::fmt::Display for SourceExpression {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{} in {}", self.item, self.collection)?;
        if let Some(t) = &self.track_by {
            write!(f, " track by {t}")?;
        }
        Ok(())
    }
}
