use note_maker::{client::NoteClient, config, ui::App};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing_subscriber::EnvFilter;

const HELP: &str = "\
Commands:
  go <fragment>   navigate, e.g. 'go #/note', 'go #/note/1', 'go #/note-new',
                  'go #/note/1/edit', 'go #/note/1/delete'
  text <value>    set the text of the open note form
  save | confirm  submit the open modal
  cancel          close the open modal
  refresh         reload the current screen
  help            show this help
  quit            exit
";

#[tokio::main]
async fn main() {
    // Logs go to stderr so they do not interleave with rendered screens
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cfg = config::load_config().unwrap_or_else(|e| {
        tracing::error!("Failed to load configuration: {e}");
        panic!("failed to load configuration: {e}");
    });

    let client = NoteClient::new(cfg.api_url.clone(), cfg.request_timeout)
        .expect("failed to initialize a client");
    tracing::info!("Talking to note server at {}", client.base_url());

    let mut app = App::new(client, &cfg);
    app.navigate("#/note").await;

    let mut stdout = tokio::io::stdout();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    print(&mut stdout, &app.render()).await;
    print(&mut stdout, "> ").await;

    while let Ok(Some(line)) = lines.next_line().await {
        let line = line.trim();
        let (command, argument) = line.split_once(' ').unwrap_or((line, ""));

        match command {
            "" => {}
            "go" => app.navigate(argument.trim()).await,
            "text" => {
                if !app.set_text(argument) {
                    print(&mut stdout, "No note form is open\n").await;
                }
            }
            "save" | "confirm" => app.submit().await,
            "cancel" => app.cancel(),
            "refresh" => app.refresh().await,
            "help" => print(&mut stdout, HELP).await,
            "quit" | "exit" => break,
            other => print(&mut stdout, &format!("Unknown command '{other}', try 'help'\n")).await,
        }

        print(&mut stdout, &app.render()).await;
        print(&mut stdout, "> ").await;
    }
}

async fn print(stdout: &mut tokio::io::Stdout, text: &str) {
    if let Err(e) = stdout.write_all(text.as_bytes()).await {
        tracing::error!("Failed to write to stdout: {e}");
    }
    if let Err(e) = stdout.flush().await {
        tracing::error!("Failed to flush stdout: {e}");
    }
}
