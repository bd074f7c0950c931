use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use ultron::commands::lines;
use ultron::voice::{
    AudioCapture, AudioPlayback, ConsoleInput, ConsoleOutput, MicrophoneInput, SpeakerOutput,
    TextToSpeech, rms,
};
use ultron::{
    BrowserLauncher, Config, Dispatcher, Session, SpeechInput, SpeechOutput, SystemBrowser,
    UnavailableBrowser, WikipediaClient,
};

/// Ultron - voice command dispatcher
#[derive(Parser)]
#[command(name = "ultron", version, about)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Type commands on stdin instead of speaking them
    #[arg(long, env = "ULTRON_TEXT_MODE")]
    text: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Answer one typed command and exit
    Ask {
        /// The command, as it would be spoken
        #[arg(required = true, num_args = 1..)]
        words: Vec<String>,
    },
    /// Test microphone input
    TestMic {
        /// Duration in seconds
        #[arg(short, long, default_value = "5")]
        duration: u64,
    },
    /// Test speaker output
    TestSpeaker,
    /// Test TTS output
    TestTts {
        /// Text to speak
        #[arg(default_value = "Systems online. Ultron activated.")]
        text: String,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(log_filter(cli.verbose)))
        .with_writer(std::io::stderr)
        .init();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("fatal: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Log filter for a `-v` count
const fn log_filter(verbose: u8) -> &'static str {
    match verbose {
        0 => "info,ultron=info",
        1 => "info,ultron=debug",
        2 => "debug",
        _ => "trace",
    }
}

#[allow(clippy::future_not_send)]
async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = Config::load()?;

    if let Some(cmd) = cli.command {
        return match cmd {
            Command::Ask { words } => ask(&config, &words.join(" ")).await,
            Command::TestMic { duration } => test_mic(duration).await,
            Command::TestSpeaker => test_speaker(&config),
            Command::TestTts { text } => test_tts(&config, &text).await,
        };
    }

    print_banner();
    let dispatcher = build_dispatcher(&config)?;

    if cli.text {
        tracing::info!("starting text session");
        let session = Session::new(ConsoleInput::stdin(), ConsoleOutput::stdout(), dispatcher);
        run_session(session).await
    } else {
        tracing::info!(
            stt = ?config.voice.stt_provider,
            tts = ?config.voice.tts_provider,
            "starting voice session"
        );
        let input = MicrophoneInput::new(&config.voice, &config.api_keys)?;
        let output = SpeakerOutput::new(&config.voice, &config.api_keys)?;
        run_session(Session::new(input, output, dispatcher)).await
    }
}

/// Run until an exit command or Ctrl-C
#[allow(clippy::future_not_send)]
async fn run_session<I: SpeechInput, O: SpeechOutput>(
    mut session: Session<I, O>,
) -> anyhow::Result<()> {
    tokio::select! {
        () = session.run() => {}
        result = tokio::signal::ctrl_c() => {
            result?;
            println!("\n\n[ULTRON TERMINATED BY USER]");
            println!("{}\n", lines::INTERRUPTED);
        }
    }
    Ok(())
}

/// Wire the dispatcher to Wikipedia and the system browser
fn build_dispatcher(config: &Config) -> anyhow::Result<Dispatcher> {
    let encyclopedia = Arc::new(WikipediaClient::new(&config.encyclopedia)?);

    let browser: Arc<dyn BrowserLauncher> = match SystemBrowser::from_config(&config.browser) {
        Ok(browser) => Arc::new(browser),
        Err(e) => {
            tracing::warn!(error = %e, "no browser launcher, websites will not open");
            Arc::new(UnavailableBrowser::new(e.to_string()))
        }
    };

    Ok(Dispatcher::new(encyclopedia, browser))
}

fn print_banner() {
    let rule = "=".repeat(60);
    println!("\n{rule}");
    println!("          VOICE ASSISTANT: ULTRON PROTOCOL");
    println!("{rule}\n");
    println!("EASTER EGGS TO TRY:");
    for prompt in lines::EASTER_EGG_PROMPTS {
        println!("- {prompt}");
    }
    println!("\n{rule}\n");
}

/// Answer one typed command
async fn ask(config: &Config, command: &str) -> anyhow::Result<()> {
    let mut dispatcher = build_dispatcher(config)?;
    let (category, response) = dispatcher.handle(command).await;

    tracing::debug!(?category, "answered");
    for line in response {
        println!("{line}");
    }
    Ok(())
}

/// Test microphone input
#[allow(clippy::future_not_send)]
async fn test_mic(duration: u64) -> anyhow::Result<()> {
    println!("Testing microphone for {duration} seconds...");
    println!("Speak into your microphone!\n");

    let mut capture = AudioCapture::new()?;
    capture.start()?;
    println!("Sample rate: {} Hz", capture.sample_rate());
    println!("---");

    for i in 0..duration {
        tokio::time::sleep(Duration::from_secs(1)).await;

        let samples = capture.peek_buffer();
        let energy = rms(&samples);
        let peak = samples.iter().map(|s| s.abs()).fold(0.0f32, f32::max);

        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let meter_len = (energy * 100.0).min(50.0) as usize;
        let meter = "#".repeat(meter_len) + &" ".repeat(50 - meter_len);

        println!("[{:2}s] RMS: {energy:.4} | Peak: {peak:.4} | [{meter}]", i + 1);
        capture.clear_buffer();
    }

    capture.stop();

    println!("\n---");
    println!("If the meter moved, your microphone is working.");
    println!("If RMS stayed near 0, check:");
    println!("  1. Run: arecord -l (to list devices)");
    println!("  2. Run: pactl info | grep 'Default Source'");
    println!("  3. Try: pavucontrol (to check levels)");

    Ok(())
}

/// Test speaker output with a sine wave
fn test_speaker(config: &Config) -> anyhow::Result<()> {
    println!("Testing speaker output...");
    println!("You should hear a 440Hz tone for 2 seconds\n");

    let playback = AudioPlayback::new(config.voice.volume)?;

    let sample_rate = 24000_u32;
    let frequency = 440.0_f32;
    #[allow(clippy::cast_precision_loss)]
    let samples: Vec<f32> = (0..sample_rate * 2)
        .map(|i| {
            let t = i as f32 / sample_rate as f32;
            (2.0 * std::f32::consts::PI * frequency * t).sin() * 0.3
        })
        .collect();

    playback.play(samples)?;

    println!("\n---");
    println!("If you heard the tone, your speakers are working!");
    println!("If not, check:");
    println!("  1. Run: pactl info | grep 'Default Sink'");
    println!("  2. Try: pavucontrol (to check output levels)");

    Ok(())
}

/// Test TTS output
async fn test_tts(config: &Config, text: &str) -> anyhow::Result<()> {
    println!("Testing TTS with text: \"{text}\"\n");

    let tts = TextToSpeech::from_config(&config.voice, &config.api_keys)?;
    println!("Synthesizing speech...");
    let mp3 = tts.synthesize(text).await?;
    println!("Got {} bytes of audio data", mp3.len());

    println!("Playing audio...");
    AudioPlayback::new(config.voice.volume)?.play_mp3(&mp3)?;

    println!("\n---");
    println!("If you heard the speech, TTS is working!");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_raises_log_level() {
        assert_eq!(log_filter(0), "info,ultron=info");
        assert_eq!(log_filter(1), "info,ultron=debug");
        assert_eq!(log_filter(2), "debug");
        assert_eq!(log_filter(5), "trace");
    }

    #[test]
    fn text_flag_and_ask_parse() {
        let cli = Cli::try_parse_from(["ultron", "--text", "-vv"]).unwrap();
        assert!(cli.text);
        assert_eq!(cli.verbose, 2);
        assert!(cli.command.is_none());

        let cli = Cli::try_parse_from(["ultron", "ask", "what", "time", "is", "it"]).unwrap();
        assert!(matches!(cli.command, Some(Command::Ask { words }) if words.len() == 4));
    }
}
