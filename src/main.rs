use anyhow::Context;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::task::JoinHandle;
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use seat_booking::{
    config::Config,
    models::{BookingRequest, ContactInfo, SubmitResponse},
    render::{render_grid, render_status},
    BookingApiClient, BookingBackend, BookingError, BookingSubmitter, SeatBoard,
};

/// Отправка, ожидающая ответа бэкенда.
type PendingSubmit = (BookingRequest, JoinHandle<Result<SubmitResponse, BookingError>>);

const HELP: &str = "\
Commands:
  <n> | seat <n>    select / deselect seat n
  name <text>       set name
  mobile <text>     set mobile
  code <text>       set user code (optional)
  submit            send the booking
  show              redraw the board
  help              this message
  quit              exit";

#[derive(Debug, PartialEq, Eq)]
enum Command {
    Toggle(u32),
    Name(String),
    Mobile(String),
    Code(String),
    Submit,
    Show,
    Help,
    Quit,
    Unknown(String),
}

fn parse_command(line: &str) -> Option<Command> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }
    let (head, rest) = match line.split_once(char::is_whitespace) {
        Some((head, rest)) => (head, rest.trim()),
        None => (line, ""),
    };

    let command = match head.to_ascii_lowercase().as_str() {
        "seat" => rest
            .parse()
            .map(Command::Toggle)
            .unwrap_or_else(|_| Command::Unknown(line.to_string())),
        "name" => Command::Name(rest.to_string()),
        "mobile" => Command::Mobile(rest.to_string()),
        "code" => Command::Code(rest.to_string()),
        "submit" => Command::Submit,
        "show" => Command::Show,
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => match other.parse() {
            Ok(id) if rest.is_empty() => Command::Toggle(id),
            _ => Command::Unknown(line.to_string()),
        },
    };
    Some(command)
}

fn redraw(board: &SeatBoard, submitter: &BookingSubmitter, form: &ContactInfo, columns: u32) {
    print!("{}", render_grid(&board.render(), columns));
    println!(
        "name={:?} mobile={:?} code={:?} selected={:?}",
        form.name,
        form.mobile,
        form.user_code,
        board.current_selection()
    );
    let status = render_status(submitter.status());
    if !status.is_empty() {
        println!("{}", status);
    }
}

async fn wait_for(pending: &mut Option<PendingSubmit>) -> Result<SubmitResponse, BookingError> {
    match pending {
        Some((_, handle)) => match handle.await {
            Ok(outcome) => outcome,
            Err(e) => Err(BookingError::Transport(e.to_string())),
        },
        None => std::future::pending().await,
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = Config::from_env().context("Failed to load configuration")?;

    // stdout занят схемой зала, логи пишем в stderr
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&config.app.rust_log))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    info!(
        "Starting seat booking widget ({}), backend at {}",
        config.app.environment, config.backend.base_url
    );

    let backend =
        BookingApiClient::from_config(&config.backend).context("Failed to create HTTP client")?;
    let columns = config.board.grid_columns;

    let mut board = SeatBoard::initialize(config.board.seat_count, &backend).await;
    let mut submitter = BookingSubmitter::new();
    let mut form = ContactInfo::default();
    let mut pending: Option<PendingSubmit> = None;

    redraw(&board, &submitter, &form, columns);
    println!("{}", HELP);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line.context("Failed to read from stdin")? else {
                    break;
                };
                let Some(command) = parse_command(&line) else {
                    continue;
                };
                debug!("Command: {:?}", command);

                match command {
                    Command::Toggle(id) => {
                        if board.toggle_seat(id).is_none() {
                            println!("Seat {} is not selectable", id);
                        }
                    }
                    Command::Name(name) => form.name = name,
                    Command::Mobile(mobile) => form.mobile = mobile,
                    Command::Code(code) => form.user_code = code,
                    Command::Submit => match submitter.begin(&board, &form) {
                        Ok(request) => {
                            let backend = backend.clone();
                            let sent = request.clone();
                            let handle = tokio::spawn(async move { backend.submit_booking(&sent).await });
                            pending = Some((request, handle));
                        }
                        Err(BookingError::Busy) => {
                            println!("Still waiting for the previous submission");
                            continue;
                        }
                        Err(_) => {}
                    },
                    Command::Show => {}
                    Command::Help => {
                        println!("{}", HELP);
                        continue;
                    }
                    Command::Quit => break,
                    Command::Unknown(raw) => {
                        println!("Unknown command: {} (try `help`)", raw);
                        continue;
                    }
                }
                redraw(&board, &submitter, &form, columns);
            }
            outcome = wait_for(&mut pending) => {
                if let Some((request, _)) = pending.take() {
                    submitter.finish(&mut board, &request, outcome);
                }
                redraw(&board, &submitter, &form, columns);
            }
        }
    }

    // Не бросаем начатую отправку: дожидаемся ответа, чтобы показать итог.
    if pending.is_some() {
        let outcome = wait_for(&mut pending).await;
        if let Some((request, _)) = pending.take() {
            submitter.finish(&mut board, &request, outcome);
        }
        redraw(&board, &submitter, &form, columns);
    }

    info!("Seat booking widget stopped");
    Ok(())
}
