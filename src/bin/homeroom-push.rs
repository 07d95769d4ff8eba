use clap::{Args, Parser, ValueEnum};
use color_eyre::eyre::WrapErr as _;
use homeroom::Config;
use homeroom_core::{Notice, Priority, dedup_tokens};
use homeroom_push::{ChunkedDispatcher, HttpPusher};
use homeroom_storage::{DeviceStore as _, SqliteStorage};

#[derive(Parser)]
#[command(name = "homeroom-push")]
#[command(about = "Broadcast a push notification", long_about = None)]
struct Cli {
    /// Notification title
    #[arg(long)]
    title: String,

    /// Notification body
    #[arg(long)]
    body: String,

    #[command(flatten)]
    target: Target,

    /// Extra payload as a JSON object
    #[arg(long)]
    data: Option<String>,

    #[arg(long, value_enum, default_value_t = PriorityArg::Default)]
    priority: PriorityArg,
}

#[derive(Args)]
#[group(required = true, multiple = false)]
struct Target {
    /// Send to a single device token
    #[arg(long)]
    token: Option<String>,

    /// Send to every registered device
    #[arg(long)]
    all: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum PriorityArg {
    Default,
    High,
}

impl From<PriorityArg> for Priority {
    fn from(arg: PriorityArg) -> Self {
        match arg {
            PriorityArg::Default => Priority::Default,
            PriorityArg::High => Priority::High,
        }
    }
}

#[tokio::main]
async fn main() -> color_eyre::eyre::Result<()> {
    homeroom::init_tracing()?;

    let cli = Cli::parse();
    let config = Config::load_or_default().wrap_err("failed to load config")?;

    let mut notice = Notice::new(cli.title, cli.body).with_priority(cli.priority.into());
    if let Some(data) = cli.data.as_deref() {
        let data: serde_json::Map<String, serde_json::Value> =
            serde_json::from_str(data).wrap_err("--data must be a JSON object")?;
        notice = notice.with_data(data);
    }

    let tokens = match cli.target.token {
        Some(token) => dedup_tokens([Some(token)]),
        None => {
            let storage = SqliteStorage::new(&config.database_url)
                .wrap_err("failed to initialize storage")?;
            storage
                .run_migrations()
                .wrap_err("failed to run migrations")?;
            let all = storage.all_tokens().wrap_err("failed to load device tokens")?;
            dedup_tokens(all.into_iter().map(Some))
        }
    };

    if tokens.is_empty() {
        println!("No device tokens to send to.");
        return Ok(());
    }

    let pusher = HttpPusher::new(&config.push).wrap_err("failed to create push client")?;
    let dispatcher = ChunkedDispatcher::from_config(pusher, &config.push);

    println!(
        "Sending to {} device(s) via {}",
        tokens.len(),
        config.push.endpoint
    );

    let results = dispatcher.dispatch(&tokens, &notice).await;
    for (i, result) in results.iter().enumerate() {
        let rendered =
            serde_json::to_string(result).wrap_err("failed to render batch result")?;
        println!("Batch {}: {}", i + 1, rendered);
    }

    Ok(())
}
