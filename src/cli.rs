//! Drives the command-line program.

use crate::auth::{OnePassword, SecretProvider, TokenResolver};
use crate::clock::{Clock, SystemClock};
use crate::conf;
pub use crate::error::Error;
use crate::request::{DEFAULT_MAX_RESULTS, DEFAULT_WINDOW, SearchRequest};
use crate::search::service::{Service, XService};
use crate::search::{self, SearchClient};
use crate::view::{self, OutputFormat};
use clap::Parser;
use clap_verbosity_flag::Verbosity;
use colored::Colorize;
use log::debug;
use std::io::{self, Write};
use std::process;

/// Prints `message` to standard error and exits with `error_code`.
pub fn die(error_code: i32, message: &str) -> ! {
    eprintln!("{} {message}", "error:".red().bold());
    process::exit(error_code);
}

/// Program configuration.
#[derive(Debug, Parser)]
#[command(version)]
#[command(about = "Searches the last week of posts on X for keywords", long_about = None)]
pub struct Config {
    #[command(flatten)]
    verbosity: Verbosity,

    /// Keyword to search for (may be repeated)
    #[arg(short = 'k', long = "keyword", value_name = "KEYWORD")]
    keyword: Vec<String>,

    /// Comma-separated keywords to search for
    #[arg(long, value_name = "LIST")]
    keywords: Option<String>,

    /// How far back to search, e.g., 30m, 24h, or 7d (at most 7d)
    #[arg(short, long, default_value = DEFAULT_WINDOW)]
    window: String,

    /// Maximum number of posts to retrieve per keyword (1-100)
    #[arg(short = 'n', long, default_value_t = DEFAULT_MAX_RESULTS)]
    max_results: u32,

    /// Only show posts in this language, e.g., "en"
    #[arg(long, value_name = "CODE")]
    lang: Option<String>,

    /// Include retweets in results
    #[arg(long, default_value_t = false)]
    include_retweets: bool,

    /// Comma-separated handles whose posts should be excluded
    #[arg(long, value_name = "HANDLES")]
    exclude_from: Option<String>,

    /// Print a short digest or the full results as JSON
    #[arg(long, value_enum, default_value_t = OutputFormat::Digest)]
    format: OutputFormat,

    /// Secret reference used to look up a bearer token when $X_BEARER_TOKEN is not set
    #[arg(long, value_name = "REFERENCE", default_value = conf::DEFAULT_SECRET_REFERENCE)]
    secret_ref: String,
}

impl Config {
    pub fn verbosity(&self) -> Verbosity {
        self.verbosity
    }

    /// Output format.
    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Secret reference handed to the secret provider.
    pub fn secret_ref(&self) -> &str {
        &self.secret_ref
    }

    /// Validates the search options and combines them into a request.
    pub fn request(&self) -> Result<SearchRequest, Error> {
        SearchRequest::build()
            .keywords(&self.keyword)
            .keyword_list(&self.keywords)
            .window(&self.window)
            .max_results(self.max_results)
            .lang(self.lang.as_deref())
            .exclude_from(&self.exclude_from)
            .include_retweets(self.include_retweets)
            .build()
    }
}

/// Runs the command-line program.
#[derive(Debug)]
pub struct Runner<S: Service, C: Clock, P: SecretProvider> {
    config: Config,
    client: SearchClient<S, C>,
    resolver: TokenResolver<P>,
}

impl Runner<XService, SystemClock, OnePassword> {
    /// Create a new program runner using the given `config`.
    pub fn new(config: Config) -> Result<Self, Error> {
        let client = SearchClient::new()?;
        let resolver = TokenResolver::from_env();
        Ok(Self::new_with(config, client, resolver))
    }
}

impl<S: Service, C: Clock, P: SecretProvider> Runner<S, C, P> {
    /// Create a new program runner that searches with `client` and gets
    /// its token from `resolver`.
    pub fn new_with(config: Config, client: SearchClient<S, C>, resolver: TokenResolver<P>) -> Self {
        Self {
            config,
            client,
            resolver,
        }
    }

    /// Run the command-line program using its stored configuration options,
    /// writing results to `out`.
    ///
    /// Options are validated before a token is looked up or any request
    /// is made. Nothing is written to `out` unless every search succeeds.
    pub async fn run<W: Write>(&self, out: &mut W) -> Result<(), Error> {
        let request = self.config.request()?;
        debug!("Searching with {request:?}");

        let token = self.resolver.resolve(self.config.secret_ref()).await?;
        debug!("Using bearer token from {}", token.provenance());

        let bundle = search::collect(&request, &token, &self.client).await?;
        let output = view::render(&bundle, self.config.format())?;
        writeln!(out, "{output}")?;
        Ok(())
    }
}

/// Runs the program with the real search API and secret provider,
/// printing results to standard output.
pub async fn run(config: Config) -> Result<(), Error> {
    let runner = Runner::new(config)?;
    runner.run(&mut io::stdout()).await
}
