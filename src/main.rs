use chrono::Local;
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use skillgrid::candidate::CandidateId;
use skillgrid::color::{self, Color};
use skillgrid::config::AppConfig;
use skillgrid::matrix::{CellValue, RowKind};
use skillgrid::report::Summary;
use skillgrid::roster::{self, RANKING_TITLE, RECOMMENDED_COUNT, RECOMMENDED_NOTE};
use skillgrid::serve::{self, App};
use skillgrid::{build_matrix, telemetry, Matrix, Roster, Selection};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "skillgrid")]
#[command(author, version, about = "Compare selected candidates on a color-banded skill heatmap")]
struct Args {
    #[command(subcommand)]
    command: Option<Command>,

    /// Candidate JSON file or directory (optional in GUI mode)
    path: Option<PathBuf>,

    /// Launch GUI folder picker (auto-enabled when double-clicked)
    #[arg(long)]
    gui: bool,

    /// Candidate ids to compare, in column order
    #[arg(short, long, value_delimiter = ',')]
    select: Vec<String>,

    /// Compare the N highest-ranked candidates when --select is not given
    #[arg(long, default_value_t = RECOMMENDED_COUNT)]
    top: usize,

    /// Output report file (.html, .svg, .json)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Directory for auto-generated reports [env: SKILLGRID_REPORT_DIR]
    #[arg(long)]
    report_dir: Option<PathBuf>,

    /// Don't auto-generate an HTML report
    #[arg(long)]
    no_report: bool,

    /// Don't prompt to open report
    #[arg(long)]
    no_open: bool,

    /// Number of parallel workers for loading (default: number of CPUs)
    #[arg(short, long)]
    jobs: Option<usize>,

    /// Only show summary
    #[arg(short, long)]
    quiet: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start interactive web UI for comparing candidates
    Serve {
        /// Candidate JSON file or directory
        path: PathBuf,

        /// Port to listen on [env: SKILLGRID_PORT, default: 3001]
        #[arg(short, long)]
        port: Option<u16>,

        /// Candidate ids selected at startup
        #[arg(short, long, value_delimiter = ',')]
        select: Vec<String>,

        /// Don't open a browser
        #[arg(long)]
        no_open: bool,
    },

    /// Print candidates ranked by total score
    Rank {
        /// Candidate JSON file or directory
        path: PathBuf,
    },
}

fn main() {
    let args = Args::parse();

    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = telemetry::init(&config.log_level) {
        eprintln!("Logging disabled: {}", e);
    }

    // Set up thread pool
    if let Some(jobs) = args.jobs {
        rayon::ThreadPoolBuilder::new()
            .num_threads(jobs)
            .build_global()
            .ok();
    }

    // Handle subcommands first
    if let Some(cmd) = args.command {
        match cmd {
            Command::Serve { path, port, select, no_open } => {
                let roster = load_roster(&path, true);
                let mut server = config.server.clone();
                if let Some(port) = port {
                    server.port = port;
                }
                let selection = Selection::from_ids(select.into_iter().map(CandidateId::new));
                if let Err(e) = serve::start(&server, App::new(roster, selection), !no_open) {
                    eprintln!("Server error: {}", e);
                    std::process::exit(1);
                }
                return;
            }
            Command::Rank { path } => {
                let roster = load_roster(&path, true);
                print_ranking(&roster);
                return;
            }
        }
    }

    // Determine if we should use GUI mode
    // With GUI feature: launch GUI if --gui flag OR no path provided
    #[cfg(feature = "gui")]
    let use_gui = args.gui || args.path.is_none();

    #[cfg(not(feature = "gui"))]
    let use_gui = false;

    #[cfg(feature = "gui")]
    let path = match args.path.clone() {
        Some(p) if !args.gui => p,
        _ => match pick_path_gui() {
            Some(p) => p,
            None => {
                eprintln!("No file or folder selected.");
                std::process::exit(0);
            }
        },
    };

    #[cfg(not(feature = "gui"))]
    let path = if let Some(p) = args.path.clone() {
        p
    } else {
        eprintln!("Usage: skillgrid <PATH>");
        eprintln!("Run 'skillgrid --help' for more options.");
        eprintln!("Note: GUI mode not available in this build.");
        std::process::exit(1);
    };

    let roster = load_roster(&path, args.quiet);
    if roster.is_empty() {
        eprintln!("No candidate records found in {}", path.display());
        std::process::exit(1);
    }

    let selection = if args.select.is_empty() {
        Selection::from_ids(roster.rank().into_iter().take(args.top).map(|r| r.id))
    } else {
        Selection::from_ids(args.select.iter().map(|id| CandidateId::new(id.as_str())))
    };

    let selected = selection.resolve(&roster);
    let matrix = match build_matrix(&selected) {
        Ok(matrix) => matrix,
        Err(e) => {
            eprintln!("\x1b[31mCannot build comparison:\x1b[0m {}", e);
            std::process::exit(1);
        }
    };

    let summary = Summary::from_matrix(&matrix);

    if !args.quiet {
        eprintln!("\x1b[1mSkillgrid - Candidate Comparison\x1b[0m");
        eprintln!("{}", "─".repeat(70));
        eprintln!("{}\n", summary.heading());
        print_matrix(&matrix);
    }

    eprintln!("\n{}", "─".repeat(70));
    eprintln!("\x1b[1mSummary:\x1b[0m");
    eprintln!("  Candidates: {}", summary.candidates);
    eprintln!("  Skills:     {}", summary.skills);
    if let Some(ref leader) = summary.leader {
        eprintln!("  \x1b[32mTop total:\x1b[0m  {} ({})", leader.name, leader.total);
    }

    let report_dir = args.report_dir.clone().unwrap_or_else(|| config.report_dir.clone());

    // Determine report path
    let report_path = if let Some(ref output) = args.output {
        Some(output.clone())
    } else if !args.no_report {
        std::fs::create_dir_all(&report_dir).ok();
        let timestamp = Local::now().format("%Y%m%d_%H%M%S");
        let filename = format!("skillgrid_{}.html", timestamp);
        Some(report_dir.join(filename))
    } else {
        None
    };

    // Generate report
    if let Some(ref output_path) = report_path {
        if let Err(e) = skillgrid::report::generate(output_path, &matrix) {
            eprintln!("Failed to write report: {}", e);
            std::process::exit(1);
        }
        if !args.quiet {
            eprintln!("\n\x1b[32mReport saved: {}\x1b[0m", output_path.display());
        }

        if !args.no_open {
            if use_gui {
                let _ = open::that(output_path);
            } else if !args.quiet {
                eprint!("\nOpen report in browser? [Y/n] ");
                io::stderr().flush().ok();

                let mut input = String::new();
                if io::stdin().read_line(&mut input).is_ok() {
                    let input = input.trim().to_lowercase();
                    if input.is_empty() || input == "y" || input == "yes" {
                        if let Err(e) = open::that(output_path) {
                            eprintln!("Failed to open report: {}", e);
                        }
                    }
                }
            }
        }
    }
}

/// Load the roster, with a progress bar for directories. Exits on failure.
fn load_roster(path: &Path, quiet: bool) -> Roster {
    let files = match roster::discover(path) {
        Ok(files) => files,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };

    let pb = if !quiet && files.len() > 1 {
        let pb = ProgressBar::new(files.len() as u64);
        if let Ok(style) = ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
        {
            pb.set_style(style.progress_chars("=>-"));
        }
        Some(pb)
    } else {
        None
    };

    let result = Roster::from_files(&files, path.is_dir(), |file| {
        if let Some(ref pb) = pb {
            pb.inc(1);
            let name = file.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_default();
            pb.set_message(name);
        }
    });

    if let Some(pb) = pb {
        pb.finish_and_clear();
    }

    match result {
        Ok(roster) => roster,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    }
}

fn print_ranking(roster: &Roster) {
    let ranked = roster.rank();
    if ranked.is_empty() {
        println!("No candidates found.");
        return;
    }

    println!("\x1b[1m{}\x1b[0m", RANKING_TITLE);
    println!("{:<4} {:<12} {:<28} {}", "#", "ID", "NAME", "TOTAL");
    println!("{}", "-".repeat(60));
    for (i, candidate) in ranked.iter().enumerate() {
        if i == RECOMMENDED_COUNT {
            println!("\x1b[90m{}\x1b[0m", RECOMMENDED_NOTE);
            println!("{}", "-".repeat(60));
        }
        let style = if candidate.recommended { "\x1b[1m" } else { "" };
        println!(
            "{}{:<4} {:<12} {:<28} {}\x1b[0m",
            style,
            i + 1,
            truncate(candidate.id.as_str(), 12),
            truncate(&candidate.short_name, 28),
            skillgrid::format::score(candidate.total_score)
        );
    }
}

/// Print the matrix with cells shaded like the heatmap.
fn print_matrix(matrix: &Matrix) {
    if matrix.is_empty() {
        eprintln!("{}", skillgrid::grid::EMPTY_MESSAGE);
        return;
    }

    let label_width = matrix
        .rows
        .iter()
        .map(|row| row.skill.chars().count())
        .max()
        .unwrap_or(0)
        .clamp(10, 32);

    print!("{:<width$} ", "", width = label_width);
    for column in &matrix.columns {
        print!("\x1b[1m{:^6}\x1b[0m", truncate(&column.label, 6));
    }
    println!();

    for row in &matrix.rows {
        let bold = if row.kind == RowKind::Experience { "\x1b[1m" } else { "" };
        print!("{}{:<width$}\x1b[0m ", bold, truncate(&row.skill, label_width), width = label_width);
        for column in &matrix.columns {
            let value = row.get(&column.id).cloned().unwrap_or(CellValue::Score(0.0));
            let (fill, text) = match value.score() {
                Some(score) => (color::color_for(score), color::text_color_for(score)),
                None => (color::NEUTRAL_FILL, color::TEXT_DARK),
            };
            print!("{}{}{:^6}\x1b[0m", ansi_bg(fill), ansi_fg(text), value.display());
        }
        println!();
    }

    print!("{:<width$} ", "Total", width = label_width);
    for column in &matrix.columns {
        print!("{:^6}", matrix.totals.get(&column.id).unwrap_or("0"));
    }
    println!();
}

fn ansi_bg(color: Color) -> String {
    rgb(color)
        .map(|(r, g, b)| format!("\x1b[48;2;{};{};{}m", r, g, b))
        .unwrap_or_default()
}

fn ansi_fg(color: Color) -> &'static str {
    if color == color::TEXT_LIGHT {
        "\x1b[97m"
    } else {
        "\x1b[30m"
    }
}

fn rgb(color: Color) -> Option<(u8, u8, u8)> {
    let hex = color.hex().strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    Some((channel(0)?, channel(2)?, channel(4)?))
}

#[cfg(feature = "gui")]
fn pick_path_gui() -> Option<PathBuf> {
    // First try folder picker
    if let Some(folder) = rfd::FileDialog::new()
        .set_title("Select folder of candidate records (or Cancel for single file)")
        .pick_folder()
    {
        return Some(folder);
    }

    // If cancelled, offer file picker
    rfd::FileDialog::new()
        .set_title("Select candidate JSON file")
        .add_filter("Candidate records", &["json"])
        .pick_file()
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
