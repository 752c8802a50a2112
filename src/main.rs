use clap::Parser;
use dialoguer::Confirm;
use indicatif::{ProgressBar, ProgressStyle};
use listing_invoice::{cli, config, error, export, fetcher, logging, proxy, renderer, session};
use cli::{Cli, Commands};
use config::Config;
use error::{InvoiceError, Result};
use listing_invoice_common::validate_listing_url;
use std::path::PathBuf;
use std::time::Duration;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);
    let config = Config::load()?;

    match cli.command {
        Commands::Generate { url, output, yes, proxy_url } => {
            println!("🧾 listing-invoice - Invoice Generator\n");

            let http = config.http_client()?;
            let client = fetcher::ListingClient::new(http.clone(), config.listing_endpoint());
            let mut session = session::InvoiceSession::new();
            session.set_url(url);

            // 1. 出品取得
            println!("[1/2] Fetching listing...");
            let spinner = ProgressBar::new_spinner();
            spinner.set_style(
                ProgressStyle::default_spinner()
                    .template("{spinner} {msg}")
                    .map_err(|e| InvoiceError::Config(e.to_string()))?,
            );
            spinner.set_message(client.endpoint().to_string());
            spinner.enable_steady_tick(Duration::from_millis(100));
            session.submit(&client).await;
            spinner.finish_and_clear();

            let Some(card) = renderer::render_card(session.listing(), &config.image_policy) else {
                println!("✖ {}", session.error());
                return Err(InvoiceError::Listing(session.error().to_string()));
            };
            println!("✔ Listing fetched\n");
            println!("{}", card);

            let confirmed = yes
                || Confirm::new()
                    .with_prompt(card.action_label())
                    .default(true)
                    .interact()
                    .map_err(|e| InvoiceError::Prompt(e.to_string()))?;
            if !confirmed {
                println!("PDF generation skipped");
                return Ok(());
            }

            // 2. PDF生成（画像はプロキシ経由）
            println!("[2/2] Generating PDF...");
            let mut _local_proxy = None;
            let proxy_base = match proxy_url.or_else(|| config.proxy_url.clone()) {
                Some(base) => base,
                None => {
                    let local = proxy::LocalProxy::spawn(http.clone()).await?;
                    let base = local.base_url();
                    _local_proxy = Some(local);
                    base
                }
            };
            let source = export::ProxyImageSource::new(http, proxy_base);

            let Some(listing) = session.listing() else {
                return Err(InvoiceError::Listing(session.error().to_string()));
            };
            let document = export::generate_invoice(listing, &source).await?;
            if !document.has_image() && listing.primary_image_url().is_some() {
                println!("- Image could not be embedded; continuing without it");
            }

            let output_dir = output.unwrap_or_else(|| PathBuf::from("."));
            let path = document.save(&output_dir)?;
            println!("✔ PDF saved: {}", path.display());

            println!("\n✅ Done");
        }

        Commands::Validate { url } => match validate_listing_url(&url) {
            Some(id) => {
                println!("✔ {}", id);
                println!("  file: {}", id.pdf_file_name());
            }
            None => {
                println!("✖ {}", listing_invoice_common::INVALID_URL_MESSAGE);
                return Err(InvoiceError::InvalidUrl(url));
            }
        },

        Commands::Serve { bind } => {
            let addr = bind.unwrap_or_else(|| config.bind_address.clone());
            let listener = tokio::net::TcpListener::bind(&addr).await?;
            println!("🖼  image proxy: http://{}{}", listener.local_addr()?, proxy::IMAGE_PROXY_PATH);
            proxy::serve(listener, config.http_client()?, shutdown_signal()).await?;
        }

        Commands::Config { set_backend_url, set_proxy_url, show } => {
            let mut config = config;

            if let Some(url) = set_backend_url {
                config.set_backend_url(url)?;
                println!("✔ Backend URL updated");
            }

            if let Some(url) = set_proxy_url {
                config.set_proxy_url(url)?;
                println!("✔ Proxy URL updated");
            }

            if show {
                println!("Config ({}):", Config::config_path()?.display());
                println!("  backend: {}", config.listing_endpoint());
                println!("  proxy: {}", config.proxy_url.as_deref().unwrap_or("(in-process)"));
                println!("  bind: {}", config.bind_address);
                match config.request_timeout_seconds {
                    Some(secs) => println!("  timeout: {}s", secs),
                    None => println!("  timeout: (client default)"),
                }
                println!("  image hosts:");
                for pattern in &config.image_policy.remote_patterns {
                    println!("    {}://{}{}", pattern.protocol, pattern.hostname, pattern.pathname);
                }
            }
        }
    }

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "failed to install CTRL+C signal handler");
    }
}
