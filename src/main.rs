use anyhow::Context;
use chrono::Utc;

use lotto_stats::{aggregator, cli, logging, remote, server, wire, Config};

#[tokio::main(flavor = "multi_thread")]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let args = cli::parse();
    if args.help {
        cli::print_help();
        return Ok(());
    }
    logging::init(args.verbose);

    let mut cfg = match args.config.as_deref() {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    };
    cfg.apply_env();

    // CLI override > env > config
    if let Some(bind) = args.bind.clone() { cfg.bind = bind; }
    if let Some(n) = args.max_draw { cfg.max_draw = Some(n); }
    if let Some(kind) = args.source { cfg.source = kind; }

    let source = remote::from_config(&cfg).context("building draw source")?;

    if let Some(draw_no) = args.draw {
        let draw = source
            .fetch_draw(draw_no)
            .await
            .with_context(|| format!("fetching draw {}", draw_no))?;
        println!("{}", serde_json::to_string_pretty(&wire::LottoNumber::from(&draw))?);
        return Ok(());
    }

    if args.recommend {
        let max_draw = cfg.max_draw_at(Utc::now());
        let table = aggregator::aggregate(source, max_draw, cfg.concurrency).await?;
        println!("{}", serde_json::to_string_pretty(&wire::Recommendation::from(&table))?);
        return Ok(());
    }

    let bind = cfg.bind.clone();
    tracing::info!(
        bind = %bind,
        max_draw = ?cfg.max_draw,
        concurrency = cfg.concurrency,
        "starting lotto-stats"
    );
    let app = server::build_app(server::AppState::new(source, cfg));

    let listener = tokio::net::TcpListener::bind(&bind)
        .await
        .with_context(|| format!("binding {}", bind))?;
    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
