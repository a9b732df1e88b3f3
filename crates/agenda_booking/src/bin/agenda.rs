// --- File: crates/agenda_booking/src/bin/agenda.rs ---
//! Command-line front end for the booking flow.

use agenda_booking::phone::format_for_display;
use agenda_booking::{
    BookingDispatcher, BookingError, BookingSession, ContactForm, DeepLinkDispatcher,
    DispatchOutcome, FileStagingStore, GatewayDispatcher, StagingStore,
};
use agenda_config::{load_config, BookingConfig};
use chrono::{DateTime, FixedOffset};
use clap::{Parser, Subcommand};
use std::process::ExitCode;
use tracing::error;

#[derive(Parser)]
#[command(name = "agenda", about = "Book a counselling session")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Book a session through the gateway, or print a pre-filled link with --link.
    Book {
        /// Session length in minutes: 15, 30 or 60.
        #[arg(short, long)]
        duration: u32,
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        phone: String,
        /// RFC 3339 start, e.g. 2025-03-01T10:00:00-06:00.
        #[arg(long)]
        start: DateTime<FixedOffset>,
        /// Use the hosted appointment page instead of the gateway.
        #[arg(long)]
        link: bool,
    },
    /// Show the staged booking left by an earlier attempt.
    Pending,
    /// Forget the staged booking.
    Clear,
    /// Render a phone number the way the booking form shows it.
    Phone { input: String },
}

#[tokio::main]
async fn main() -> ExitCode {
    agenda_common::logging::init();
    let cli = Cli::parse();

    match run(cli.command).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(command: Commands) -> Result<(), BookingError> {
    if let Commands::Phone { input } = &command {
        println!("{}", format_for_display(input));
        return Ok(());
    }

    let booking = load_config()?.booking();
    let store = FileStagingStore::from_config(&booking);

    match command {
        Commands::Book {
            duration,
            name,
            email,
            phone,
            start,
            link,
        } => {
            let form = ContactForm { name, email, phone };
            book(&booking, &store, duration, &form, start, link).await
        }
        Commands::Pending => {
            match BookingSession::recover(&store)? {
                Some(record) => println!(
                    "{} para {} <{}> ({}), solicitado para {}",
                    record.selected_duration.label(),
                    record.user_data.name,
                    record.user_data.email,
                    format_for_display(&record.user_data.phone),
                    record.requested_start.to_rfc3339()
                ),
                None => println!("No hay reservas pendientes"),
            }
            Ok(())
        }
        Commands::Clear => store.clear(),
        Commands::Phone { .. } => Ok(()),
    }
}

async fn book(
    booking: &BookingConfig,
    store: &dyn StagingStore,
    minutes: u32,
    form: &ContactForm,
    start: DateTime<FixedOffset>,
    link: bool,
) -> Result<(), BookingError> {
    let dispatcher: Box<dyn BookingDispatcher> = if link {
        Box::new(DeepLinkDispatcher::from_config(booking)?)
    } else {
        Box::new(GatewayDispatcher::from_config(booking)?)
    };

    let mut session = BookingSession::new();
    let selection = session.select_duration(minutes)?;
    println!("{}", selection.duration.label());

    match session
        .submit(form, start, store, dispatcher.as_ref())
        .await?
    {
        DispatchOutcome::Redirect { url } => println!("Continúa tu reserva en: {}", url),
        DispatchOutcome::Booked { event_id, link } => {
            println!("Éxito: cita agendada");
            if let Some(event_id) = event_id {
                println!("Evento: {}", event_id);
            }
            if let Some(link) = link {
                println!("Enlace: {}", link);
            }
        }
    }
    Ok(())
}
