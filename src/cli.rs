use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "cookiescan", about = "Website cookie-audit crawler")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Crawl a site and write a cookie audit report
    Scan {
        /// Seed URL the crawl starts from
        #[arg(long, env = "START_URL", default_value = "https://www.google.com/")]
        start_url: String,

        /// Report filename prefix
        #[arg(short, long, env = "OUTPUT", default_value = "cookie-report")]
        output: String,

        /// Name of the session cookie seeded before crawling
        #[arg(long, env = "SESSION_COOKIE1_NAME", default_value = "session_cookie")]
        session_cookie_name: String,

        /// Value of the seeded session cookie
        #[arg(long, env = "SESSION_COOKIE1_VALUE", default_value = "example_session_value")]
        session_cookie_value: String,

        /// Maximum links to visit after the seed page
        #[arg(long, env = "MAX_LINKS", default_value = "30")]
        max_links: usize,

        /// Maximum external cookie lookups
        #[arg(long, env = "MAX_LOOKUPS", default_value = "20")]
        max_lookups: usize,

        /// Run the browser with a visible window
        #[arg(long, env = "DEBUG")]
        debug: bool,
    },
    /// Remove previously written report files from the current directory
    Clean {
        /// Report filename prefix to match
        #[arg(short, long, env = "OUTPUT", default_value = "cookie-report")]
        output: String,
    },
}
