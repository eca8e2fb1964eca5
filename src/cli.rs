use crate::{
    config::{Config, Overrides, TomlConfig},
    error::{Context, Error, ResultExt},
    util::{from_hex, hex},
    vectors::{self, Source},
};
use clap::{ArgAction, Args, Parser, Subcommand};
use crypto_common::erase::Erase;
use std::{
    io::{BufWriter, Write},
    path::PathBuf,
};

const RULE: &str = "------------------------------------------------------------------------";

#[derive(Debug, Parser)]
#[clap(about, author, version = crate::EXPANDED_VERSION)]
#[clap(help_template = r"{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}")]
pub struct Cli {
    #[clap(subcommand)]
    pub subcommand: Command,
    #[clap(short, long, global = true)]
    /// TOML file with default `t_cost`, `m_cost`, `out_len` and `seed`
    pub config: Option<PathBuf>,
    #[clap(short, long, global = true, action = ArgAction::Count)]
    /// log more (-v: debug, -vv: trace); `RUST_LOG` takes precedence
    pub verbose: u8,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// derive a key from a password and a salt
    #[clap(alias = "h")]
    Hash(HashArgs),
    /// print test vectors
    #[clap(alias = "test-vectors")]
    Vectors(VectorArgs),
    /// show version information
    Version,
}

#[derive(Debug, Clone, Args)]
pub struct HashArgs {
    /// the password
    pub password: String,
    /// the salt
    pub salt: String,
    /// output size in bytes (default=64)
    pub out_len: Option<usize>,
    /// time cost: number of passes over the memory matrix (default=1)
    pub t_cost: Option<u32>,
    /// memory cost: number of rows of the memory matrix (default=16)
    pub rows: Option<u64>,
    /// read the password and the salt as hex strings
    #[clap(long)]
    pub hex: bool,
}

#[derive(Debug, Clone, Copy, Args)]
pub struct VectorArgs {
    /// time cost (default=1)
    pub t_cost: Option<u32>,
    /// memory cost in rows (default=16)
    pub rows: Option<u64>,
    /// draw passwords and salts from this seed instead of counting sequences
    #[clap(long, conflicts_with = "random")]
    pub seed: Option<u64>,
    /// draw passwords and salts from a fresh random seed (printed with the
    /// vectors)
    #[clap(long)]
    pub random: bool,
}

impl Cli {
    pub fn run(self) -> Result<(), Context> {
        let toml_config = match &self.config {
            Some(path) => TomlConfig::parse(
                &std::fs::read_to_string(path)
                    .context(format!("while reading config file at '{}'", path.display()))?,
            )
            .context("while parsing config file")?,
            None => TomlConfig::default(),
        };
        match self.subcommand {
            Command::Version => {
                println!("{}", crate::EXPANDED_VERSION);
                Ok(())
            }
            Command::Hash(args) => {
                let config = Config::new(
                    &toml_config,
                    Overrides {
                        out_len: args.out_len,
                        t_cost: args.t_cost,
                        m_cost: args.rows,
                        seed: None,
                    },
                )
                .context("while reading parameters")?;
                Ok(hash(args, &config)?)
            }
            Command::Vectors(args) => {
                let config = Config::new(
                    &toml_config,
                    Overrides {
                        out_len: None,
                        t_cost: args.t_cost,
                        m_cost: args.rows,
                        seed: args.seed,
                    },
                )
                .context("while reading parameters")?;
                let source = if args.random {
                    Source::random()
                } else {
                    config.seed().map_or(Source::Sequential, Source::Seeded)
                };
                let mut out = BufWriter::new(std::io::stdout().lock());
                vectors::write(&mut out, source, config.t_cost(), config.m_cost())?;
                out.flush().context("while writing test vectors")?;
                Ok(())
            }
        }
    }
}

fn decode(args: &HashArgs) -> Result<(Vec<u8>, Vec<u8>), Error> {
    if args.hex {
        Ok((
            from_hex(&args.password).map_err(|()| Error::Hex("password"))?,
            from_hex(&args.salt).map_err(|()| Error::Hex("salt"))?,
        ))
    } else {
        Ok((
            args.password.as_bytes().to_vec(),
            args.salt.as_bytes().to_vec(),
        ))
    }
}

fn hash(mut args: HashArgs, config: &Config) -> Result<(), Error> {
    let (mut password, salt) = decode(&args)?;
    let params = lyra::Params::new(config.t_cost(), config.m_cost())?;
    println!("Inputs:");
    println!("\tPassword: {}", args.password);
    println!("\tPassword Size: {}", password.len());
    println!("\tSalt: {}", args.salt);
    println!("\tOutput Size: {}", config.out_len());
    println!("{RULE}");
    println!("Parameters:");
    println!("\tT: {}", params.t_cost());
    println!("\tR: {}", params.m_cost());
    println!("\tC: {}", lyra::N_COLS);
    match params.memory_bytes() {
        Some(bytes) => println!("\tMemory: {bytes} bytes"),
        None => println!("\tMemory: more than {} bytes", u64::MAX),
    }
    println!("{RULE}");
    let result = lyra::hash(
        &password,
        &salt,
        config.out_len(),
        params.t_cost(),
        params.m_cost(),
    );
    password.iter_mut().erase();
    std::mem::take(&mut args.password)
        .into_bytes()
        .iter_mut()
        .erase();
    let key = result?;
    println!("Output:");
    println!();
    println!("\tK: {}", hex(key.as_bytes()));
    println!("{RULE}");
    Ok(())
}
