use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[command(name = "ultrad", about = "HTTP bridge for Ultralytics YOLO CLI tasks", version)]
pub struct Cli {
    /// Address to bind the HTTP server on.
    #[arg(long)]
    pub host: Option<String>,

    /// Port to listen on.
    #[arg(long)]
    pub port: Option<u16>,

    /// Executable invoked for every task.
    #[arg(long)]
    pub bin: Option<String>,

    /// Per-task wall-clock budget in seconds.
    #[arg(long)]
    pub timeout: Option<u64>,
}
