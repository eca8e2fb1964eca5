use crate::error::Error;

pub const DEFAULT_OUT_LEN: usize = 64;
pub const DEFAULT_T_COST: u32 = 1;
pub const DEFAULT_M_COST: u64 = 16;

#[allow(clippy::module_name_repetitions)]
#[derive(Debug, Default)]
pub struct TomlConfig {
    table: toml::value::Table,
}

impl TomlConfig {
    pub const fn new(table: toml::value::Table) -> Self {
        Self { table }
    }

    pub fn parse(s: &str) -> Result<Self, Error> {
        Ok(Self::new(toml::from_str::<toml::value::Table>(s)?))
    }

    fn positive<T: TryFrom<i64>>(&self, field: &'static str) -> Result<Option<T>, Error> {
        match self.table.get(field) {
            None => Ok(None),
            Some(toml::Value::Integer(v)) if *v > 0 => T::try_from(*v)
                .map(Some)
                .map_err(|_| Error::InvalidField(field)),
            Some(_) => Err(Error::InvalidField(field)),
        }
    }

    pub fn t_cost(&self) -> Result<Option<u32>, Error> {
        self.positive("t_cost")
    }

    pub fn m_cost(&self) -> Result<Option<u64>, Error> {
        self.positive("m_cost")
    }

    pub fn out_len(&self) -> Result<Option<usize>, Error> {
        self.positive("out_len")
    }

    #[allow(clippy::cast_sign_loss)]
    pub fn seed(&self) -> Result<Option<u64>, Error> {
        match self.table.get("seed") {
            None => Ok(None),
            // TOML integers are signed; the bit pattern is the seed.
            Some(toml::Value::Integer(v)) => Ok(Some(*v as u64)),
            Some(_) => Err(Error::InvalidField("seed")),
        }
    }
}

/// Parameters after merging the command line over the config file over the
/// built-in defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    out_len: usize,
    t_cost: u32,
    m_cost: u64,
    seed: Option<u64>,
}

/// Values given on the command line. `None` falls through to the file.
#[derive(Debug, Clone, Copy, Default)]
pub struct Overrides {
    pub out_len: Option<usize>,
    pub t_cost: Option<u32>,
    pub m_cost: Option<u64>,
    pub seed: Option<u64>,
}

impl Config {
    pub fn new(t: &TomlConfig, o: Overrides) -> Result<Self, Error> {
        Ok(Self {
            out_len: match o.out_len {
                Some(v) => v,
                None => t.out_len()?.unwrap_or(DEFAULT_OUT_LEN),
            },
            t_cost: match o.t_cost {
                Some(v) => v,
                None => t.t_cost()?.unwrap_or(DEFAULT_T_COST),
            },
            m_cost: match o.m_cost {
                Some(v) => v,
                None => t.m_cost()?.unwrap_or(DEFAULT_M_COST),
            },
            seed: match o.seed {
                Some(v) => Some(v),
                None => t.seed()?,
            },
        })
    }

    pub const fn out_len(&self) -> usize {
        self.out_len
    }

    pub const fn t_cost(&self) -> u32 {
        self.t_cost
    }

    pub const fn m_cost(&self) -> u64 {
        self.m_cost
    }

    pub const fn seed(&self) -> Option<u64> {
        self.seed
    }
}
