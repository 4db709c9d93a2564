use clap::{self, Parser as _};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use unitload::resolver::MapResolver;
use unitload::{loader, Bootstrap, Handle, Loader, ResolvingLoader, Runtime, UnitName};

mod directory;

#[derive(clap::Parser, Debug)]
#[clap(about = "Resolves units by name, offering each name to a resolver before the bootstrap loader")]
struct Arguments {
    /// Directory whose files are offered by the resolver, named after the unit they define.
    #[clap(long, short)]
    units: Option<std::path::PathBuf>,
    /// Directory whose files are builtin units of the bootstrap loader.
    #[clap(long, short)]
    builtins: Option<std::path::PathBuf>,
    /// If set, the resolving loader has no resolver and every name is resolved by the bootstrap loader.
    #[clap(long, conflicts_with = "units")]
    no_resolver: bool,
    /// Names of the units to resolve, in order.
    #[clap(required = true)]
    names: Vec<String>,
}

const LOG_VARIABLE: &str = "UNITLOAD_LOG";

fn load(runtime: &Runtime, name: &str) -> Result<Handle, Box<dyn std::error::Error>> {
    Ok(runtime.load(&UnitName::try_from_str(name)?)?)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_env(LOG_VARIABLE).unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let arguments = Arguments::parse();

    let bootstrap = {
        let mut bootstrap = Bootstrap::new();
        if let Some(builtins) = &arguments.builtins {
            for (name, definition) in directory::read_definitions(builtins)? {
                bootstrap.define(name, definition)?;
            }
        }
        bootstrap.into_shared()
    };

    let loader: Arc<dyn Loader> = if arguments.no_resolver {
        ResolvingLoader::without_resolver(bootstrap).into_shared()
    } else {
        let resolver: MapResolver = match &arguments.units {
            Some(units) => directory::read_definitions(units)?.into_iter().collect(),
            None => MapResolver::new(),
        };
        tracing::debug!(count = resolver.len(), "resolver definitions read");
        ResolvingLoader::new(bootstrap, resolver).into_shared()
    };

    let mut chain = vec![loader.label()];
    chain.extend(loader::ancestors(loader.as_ref()).map(|ancestor| ancestor.label()));
    tracing::debug!(?chain, "loader chain");

    let runtime = Runtime::new(loader);
    let mut failed = false;

    for name in &arguments.names {
        match load(&runtime, name) {
            Ok(unit) => println!(
                "{} defined by {}, {} bytes, fingerprint {:016x}",
                unit.name(),
                unit.defined_by(),
                unit.definition().len(),
                unit.fingerprint()
            ),
            Err(error) => {
                eprintln!("Error: {}", error);
                failed = true;
            }
        }
    }

    if failed {
        std::process::exit(1)
    }

    Ok(())
}
