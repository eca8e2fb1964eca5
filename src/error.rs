use std::{
    borrow::Cow,
    fmt::{Debug, Display},
};

pub enum Error {
    Hex(&'static str),
    InvalidField(&'static str),
    Io(std::io::Error),
    Lyra(lyra::Error),
    Toml(toml::de::Error),
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Hex(what) => write!(f, "{what} is not valid hex"),
            Self::InvalidField(field) => write!(f, "invalid value for config field `{field}`"),
            Self::Io(e) => Display::fmt(e, f),
            Self::Lyra(e) => Display::fmt(e, f),
            Self::Toml(e) => write!(f, "could not parse TOML config: {e}"),
        }
    }
}

impl Debug for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Display::fmt(self, f)
    }
}

impl From<std::io::Error> for Error {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<toml::de::Error> for Error {
    fn from(value: toml::de::Error) -> Self {
        Self::Toml(value)
    }
}

impl From<lyra::Error> for Error {
    fn from(value: lyra::Error) -> Self {
        Self::Lyra(value)
    }
}

pub struct Context {
    error: Error,
    context: Option<Cow<'static, str>>,
}

impl Display for Context {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(context) = &self.context {
            write!(f, "{}: {}", context, self.error)
        } else {
            Display::fmt(&self.error, f)
        }
    }
}

impl Debug for Context {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self, f)
    }
}

impl From<Error> for Context {
    fn from(error: Error) -> Self {
        Self {
            error,
            context: None,
        }
    }
}

pub trait ResultExt<T> {
    fn context<C: Into<Cow<'static, str>>>(self, context: C) -> Result<T, Context>;
}

impl<T, E: Into<Error>> ResultExt<T> for Result<T, E> {
    fn context<C: Into<Cow<'static, str>>>(self, context: C) -> Result<T, Context> {
        self.map_err(|e| Context {
            error: e.into(),
            context: Some(context.into()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allocation_failure_message_is_fixed() {
        let e: Context = Error::from(lyra::Error::Allocation { rows: u64::MAX }).into();
        assert_eq!(
            format!("{e:?}"),
            "unable to allocate memory (R too large?)"
        );
    }

    #[test]
    fn context_is_prefixed() {
        let r: Result<(), _> = Err(Error::InvalidField("t_cost"));
        let e = r.context("while reading config").unwrap_err();
        assert_eq!(
            e.to_string(),
            "while reading config: invalid value for config field `t_cost`"
        );
    }
}
