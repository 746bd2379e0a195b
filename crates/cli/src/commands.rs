use clap::Subcommand;

#[derive(Subcommand)]
pub enum Commands {
    Check {
        #[arg(long, help = "Pipeline config file path")]
        config: String,
    },
    Validate {
        #[arg(long, help = "Pipeline config file path")]
        config: String,
    },
    Transform {
        #[arg(long, help = "Pipeline config file path")]
        config: String,
    },
    Load {
        #[arg(long, help = "Pipeline config file path")]
        config: String,

        #[arg(long, help = "Read additional environment variables from this file")]
        env_file: Option<String>,
    },
    Run {
        #[arg(long, help = "Pipeline config file path")]
        config: String,

        #[arg(long, help = "Read additional environment variables from this file")]
        env_file: Option<String>,

        #[arg(
            long,
            help = "If specified, writes the JSON run summary to this file instead of stdout"
        )]
        output: Option<String>,
    },
    /// Test database connectivity using the `PG_*` environment variables
    TestConn {
        #[arg(long, help = "Read additional environment variables from this file")]
        env_file: Option<String>,
    },
}
