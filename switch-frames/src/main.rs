use bytes::BytesMut;
use clap::{Parser, Subcommand};
use color_eyre::eyre::{eyre, Context, Result};
use switch_codec::SwitchCodec;
use switch_protocol::{
    decode_frame, format_escaped, format_hex, parse_hex, CommandTable, Frame,
};
use tokio_util::codec::Decoder;
use tracing::{debug, Level};
use tracing_subscriber::FmtSubscriber;

mod render;

use render::Format;

#[derive(Parser, Debug)]
#[command(version, about = "Builds and inspects frames for the switch controller")]
struct Args {
    #[arg(long, default_value = "info", global = true)]
    log_level: Level,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the frame of every entry in the command table
    Table {
        /// Add a command, or replace the payload of a built-in one
        #[arg(short, long = "command", value_name = "NAME=PAYLOAD", value_parser = parse_entry)]
        commands: Vec<(String, String)>,

        /// Start from an empty table instead of the built-in commands
        #[arg(long)]
        no_defaults: bool,

        #[arg(short, long, value_enum, default_value_t = Format::All)]
        format: Format,
    },
    /// Print the frame carrying a single command
    Encode { command: String },
    /// Print the payloads of frames given as hex or escaped bytes
    Decode { bytes: String },
}

fn parse_entry(s: &str) -> std::result::Result<(String, String), String> {
    let (name, payload) = s
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=PAYLOAD, got '{}'", s))?;
    if name.is_empty() {
        return Err(format!("missing command name in '{}'", s));
    }
    Ok((name.to_owned(), payload.to_owned()))
}

fn build_table(commands: Vec<(String, String)>, no_defaults: bool) -> CommandTable {
    let mut table = if no_defaults {
        CommandTable::empty()
    } else {
        CommandTable::default()
    };
    table.extend(commands);
    table
}

fn encode(command: &str) -> Result<String> {
    let frame = Frame::new(command).with_context(|| format!("Failed to encode '{}'", command))?;
    let bytes = frame.to_bytes();
    Ok(format!(
        "Hex: {}\nBytes: b\"{}\"",
        format_hex(&bytes),
        format_escaped(&bytes)
    ))
}

fn decode(text: &str) -> Result<Vec<String>> {
    let bytes = parse_hex(text).with_context(|| "Failed to read frame bytes")?;
    let mut src = BytesMut::from(&bytes[..]);
    let mut codec = SwitchCodec::default();
    let mut payloads = Vec::new();

    while let Some(frame) = codec.decode(&mut src).with_context(|| "Failed to decode frame")? {
        debug!("Decoded frame {:?}", frame);
        payloads.push(frame.into_payload());
    }

    if !src.is_empty() {
        // report why the leftover bytes are not a frame
        decode_frame(&src).with_context(|| "Failed to decode trailing bytes")?;
    }
    if payloads.is_empty() {
        return Err(eyre!("No frame found in {} bytes", bytes.len()));
    }

    Ok(payloads)
}

fn main() -> Result<()> {
    color_eyre::install()?;

    let args = Args::parse();

    tracing::subscriber::set_global_default(
        FmtSubscriber::builder()
            .with_max_level(args.log_level)
            .with_writer(std::io::stderr)
            .finish(),
    )?;

    match args.command {
        Command::Table {
            commands,
            no_defaults,
            format,
        } => {
            let table = build_table(commands, no_defaults);
            debug!("Rendering {} commands as {:?}", table.len(), format);
            println!("{}", render::render(&table, format)?);
        }
        Command::Encode { command } => println!("{}", encode(&command)?),
        Command::Decode { bytes } => {
            for payload in decode(&bytes)? {
                println!("{}", payload);
            }
        }
    }

    Ok(())
}
