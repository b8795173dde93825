/// Command-line interface configuration
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug, Clone)]
#[command(name = "shapemotion-terminal")]
#[command(about = "Animated shape scenes rendered as ASCII in the terminal", long_about = None)]
pub struct Cli {
    /// Demo scene to start with
    #[arg(long, default_value = "spin")]
    pub scene: String,

    /// Target frames per second
    #[arg(long, default_value_t = 30, value_parser = clap::value_parser!(u32).range(1..=240))]
    pub fps: u32,

    /// Show an STL file instead of a demo scene
    #[arg(long)]
    pub stl: Option<PathBuf>,

    /// Print the available scenes and exit
    #[arg(long)]
    pub list: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::parse_from(["shapemotion-terminal"]);
        assert_eq!(cli.scene, "spin");
        assert_eq!(cli.fps, 30);
        assert!(cli.stl.is_none());
        assert!(!cli.list);
    }

    #[test]
    fn test_zero_fps_rejected() {
        assert!(Cli::try_parse_from(["shapemotion-terminal", "--fps", "0"]).is_err());
    }

    #[test]
    fn test_stl_path() {
        let cli = Cli::parse_from(["shapemotion-terminal", "--stl", "part.stl"]);
        assert_eq!(cli.stl, Some(PathBuf::from("part.stl")));
    }
}
