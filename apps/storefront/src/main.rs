use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use client_core::{
    BookingOutcome, CatalogService, CheckoutOutcome, HttpCatalogService, Notification,
    SortAttribute, StorefrontController,
};
use shared::domain::{Lesson, LessonId};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod config;

use config::load_settings;

#[derive(Parser, Debug)]
#[command(name = "storefront", about = "Browse and book Learn Lounge lessons")]
struct Args {
    /// Catalog service base url; overrides storefront.toml and the environment.
    #[arg(long)]
    api_url: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the catalog.
    List {
        #[arg(long, default_value = "subject")]
        sort: SortAttribute,
        #[arg(long)]
        desc: bool,
    },
    /// Search lessons by subject or location.
    Search { query: String },
    /// Book lessons and place an order.
    Checkout {
        /// Lesson id to book; repeat to book several spaces.
        #[arg(long = "book", required = true)]
        lessons: Vec<String>,
        #[arg(long)]
        name: String,
        #[arg(long)]
        phone: String,
        #[arg(long)]
        coupon: Option<String>,
    },
    /// Overwrite the remaining spaces of one lesson.
    SetSpaces { lesson_id: String, spaces: u32 },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let mut settings = load_settings().context("failed to load settings")?;
    if let Some(api_url) = args.api_url {
        settings.api_base_url = api_url;
    }

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&settings.log_filter)),
        )
        .init();

    let service = match settings.request_timeout() {
        Some(timeout) => HttpCatalogService::with_timeout(&settings.api_base_url, timeout),
        None => HttpCatalogService::new(&settings.api_base_url),
    }
    .context("failed to build catalog client")?;
    info!(api_base_url = %service.base_url(), "storefront starting");
    let service: Arc<dyn CatalogService> = Arc::new(service);
    let mut controller = StorefrontController::new(service);

    match args.command {
        Command::List { sort, desc } => {
            controller
                .fetch_catalog()
                .await
                .context("failed to fetch lessons")?;
            controller.set_sort_attribute(sort);
            if desc {
                controller.toggle_sort_order();
            }
            print_lessons(&controller.sorted_lessons());
        }
        Command::Search { query } => {
            controller.set_search_query(query);
            // The controller records a message for both empty results and failures.
            let _ = controller.search_catalog().await;
            if let Some(message) = controller.search_message() {
                println!("{message}");
            }
            print_lessons(&controller.sorted_lessons());
        }
        Command::Checkout {
            lessons,
            name,
            phone,
            coupon,
        } => checkout(&mut controller, &lessons, name, phone, coupon).await?,
        Command::SetSpaces { lesson_id, spaces } => {
            let result = controller
                .update_lesson_spaces(&LessonId::new(lesson_id), spaces)
                .await;
            print_notification(controller.notification());
            result.context("failed to update lesson spaces")?;
        }
    }

    Ok(())
}

async fn checkout(
    controller: &mut StorefrontController,
    lessons: &[String],
    name: String,
    phone: String,
    coupon: Option<String>,
) -> Result<()> {
    controller
        .fetch_catalog()
        .await
        .context("failed to fetch lessons")?;

    for raw_id in lessons {
        let outcome = controller.book_item(&LessonId::new(raw_id.as_str()));
        print_notification(controller.notification());
        if !matches!(outcome, BookingOutcome::Booked { .. }) {
            bail!("could not book lesson {raw_id}");
        }
    }

    if let Some(code) = coupon {
        controller.apply_coupon(code);
        print_notification(controller.notification());
    }

    controller.set_name(name);
    controller.set_phone(phone);
    if controller.contact().name_error() {
        println!("Name must contain only letters and spaces.");
    }
    if controller.contact().phone_error() {
        println!("Phone must contain only digits.");
    }

    for entry in controller.cart() {
        println!(
            "  {:<24} x{:<3} {:>8.2}",
            entry.lesson.subject,
            entry.quantity,
            entry.line_total()
        );
    }
    let totals = controller.totals();
    println!("Subtotal: {:.2}", totals.subtotal);
    println!("Discount: {:.2}", totals.discount);
    println!("Tax:      {:.2}", totals.tax);
    println!("Total:    {:.2}", totals.final_total);

    match controller.submit_order().await {
        CheckoutOutcome::Invalid => bail!("checkout needs a valid name and phone number"),
        CheckoutOutcome::Rejected { reason } => {
            print_notification(controller.notification());
            bail!("order was not placed: {reason}");
        }
        CheckoutOutcome::Submitted { space_sync, .. } => {
            print_notification(controller.notification());
            for failure in &space_sync.failed {
                println!(
                    "  could not update {} ({}): {}",
                    failure.subject, failure.lesson_id, failure.reason
                );
            }
        }
    }
    Ok(())
}

fn print_notification(notification: Option<&Notification>) {
    if let Some(notification) = notification {
        println!("[{}] {}", notification.title, notification.message);
    }
}

fn print_lessons(lessons: &[Lesson]) {
    for lesson in lessons {
        println!(
            "{:<26} {:<24} {:<16} {:>8.2} {:>4} left",
            lesson.id, lesson.subject, lesson.location, lesson.price, lesson.spaces
        );
    }
}
