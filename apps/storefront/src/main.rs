use std::{path::PathBuf, sync::Arc};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use client_core::{
    config::{load_settings, validate_endpoint, Settings},
    ChatCommand, ChatSession, FaqMatcher, HttpFormRelay, OrderSubmissionController,
    SubmitOutcome,
};
use shared::{
    catalog::{default_catalog, find_product},
    domain::{Product, ProductId},
    protocol::{ADDRESS_FIELD, NAME_FIELD, ORDER_FIELD, PHONE_FIELD},
};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

mod controller;

use controller::{
    events::{status_line, FormSurface, OrderCommand},
    reducer::OrderPanel,
};

#[derive(Parser, Debug)]
struct Cli {
    /// TOML knowledge base replacing the built-in FAQ entries.
    #[arg(long)]
    faq: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Interactive chat with the FAQ helper.
    Chat,
    /// Answer a single question and exit.
    Ask { question: String },
    /// List the donut catalog.
    Catalog,
    /// Send an order to the form relay.
    Order {
        #[arg(long)]
        name: String,
        #[arg(long)]
        phone: String,
        #[arg(long)]
        order: Option<String>,
        #[arg(long)]
        address: Option<String>,
        /// Catalog product to prefill the order with; uses the quick-order dialog.
        #[arg(long)]
        product: Option<u32>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
    let cli = Cli::parse();
    let settings = load_settings();

    match cli.command {
        Command::Chat => {
            let matcher = load_matcher(cli.faq.as_deref(), &settings)?;
            run_chat(matcher, &settings).await?;
        }
        Command::Ask { question } => {
            let matcher = load_matcher(cli.faq.as_deref(), &settings)?;
            println!("{}", matcher.answer(&question));
        }
        Command::Catalog => {
            for product in default_catalog() {
                print_product(&product);
            }
        }
        Command::Order {
            name,
            phone,
            order,
            address,
            product,
        } => {
            let fields = [
                (NAME_FIELD, Some(name)),
                (PHONE_FIELD, Some(phone)),
                (ORDER_FIELD, order),
                (ADDRESS_FIELD, address),
            ];
            run_order(&settings, product.map(ProductId), fields).await?;
        }
    }

    Ok(())
}

fn load_matcher(path: Option<&std::path::Path>, settings: &Settings) -> Result<Arc<FaqMatcher>> {
    let matcher = match path {
        Some(path) => FaqMatcher::from_path(path, &settings.support_phone)
            .with_context(|| format!("failed to load knowledge base '{}'", path.display()))?,
        None => FaqMatcher::builtin(&settings.support_phone),
    };
    Ok(Arc::new(matcher))
}

fn resolve_product(catalog: &[Product], id: ProductId) -> Result<&Product> {
    find_product(catalog, id).with_context(|| format!("unknown product id {}", id.0))
}

fn print_product(product: &Product) {
    println!(
        "#{} {}: {} ₽\n    {}",
        product.id.0, product.name, product.price_rub, product.description
    );
}

async fn run_chat(matcher: Arc<FaqMatcher>, settings: &Settings) -> Result<()> {
    let mut chat = ChatSession::new(matcher);
    chat.dispatch(ChatCommand::Open);
    if let Some(greeting) = chat.transcript().first() {
        println!("🤖 {}", greeting.text);
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await.context("failed to read stdin")? {
        if matches!(line.trim(), "/quit" | "/exit") {
            break;
        }
        let Some(exchange) = chat.dispatch(ChatCommand::Send(line)) else {
            continue;
        };
        tokio::time::sleep(settings.chat_reply_delay()).await;
        println!("🤖 {}", exchange.reply.text);
    }

    chat.dispatch(ChatCommand::Close);
    Ok(())
}

async fn run_order(
    settings: &Settings,
    product: Option<ProductId>,
    fields: [(&str, Option<String>); 4],
) -> Result<()> {
    let endpoint = validate_endpoint(&settings.relay_endpoint)?;
    let catalog = default_catalog();
    let mut panel = OrderPanel::default();

    let surface = if let Some(product_id) = product {
        print_product(resolve_product(&catalog, product_id)?);
        panel.dispatch(&catalog, OrderCommand::OpenDialog(Some(product_id)));
        FormSurface::Dialog
    } else {
        FormSurface::Section
    };

    for (field, value) in fields {
        if let Some(value) = value {
            panel.dispatch(
                &catalog,
                OrderCommand::EditField {
                    field: field.to_string(),
                    value,
                },
            );
        }
    }

    let order_fields = panel.form.validate()?;
    let controller = OrderSubmissionController::new(
        HttpFormRelay::new(settings.request_timeout()),
        endpoint.as_str(),
    );

    panel.dispatch(&catalog, OrderCommand::Dispatched(surface));
    if let Some(status) = &panel.status {
        println!("{status}");
    }

    match controller.submit(order_fields, &settings.access_key).await {
        Ok(SubmitOutcome::Completed(state)) => {
            panel.dispatch(&catalog, OrderCommand::Finished(state));
        }
        Ok(SubmitOutcome::Superseded) => {
            panel.dispatch(&catalog, OrderCommand::Reset);
        }
        Err(rejected) => {
            panel.dispatch(&catalog, OrderCommand::Refused(rejected));
        }
    }

    let status = panel
        .status
        .clone()
        .or_else(|| status_line(&controller.state()));
    if let Some(status) = status {
        println!("{status}");
    }

    Ok(())
}
