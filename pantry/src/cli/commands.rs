use clap::{builder::EnumValueParser, value_parser, Arg, Command};

use crate::view::SortMode;

pub fn init_get_subcommand() -> Command {
    Command::new("get")
        .about("Get the gallery's playlists")
        .subcommand_required(true)
        .subcommand(
            Command::new("playlists")
                .about("Get the categorized playlists")
                .arg(
                    Arg::new("mode")
                        .short('m')
                        .long("mode")
                        .value_parser(EnumValueParser::<SortMode>::new())
                        .help("How playlists are arranged, defaults to the configured mode"),
                )
                .arg(
                    Arg::new("category")
                        .short('c')
                        .long("category")
                        .help("Only keep playlists of a category"),
                ),
        )
        .subcommand(Command::new("categories").about("Get the playlist count of each category"))
        .subcommand(
            Command::new("carousel")
                .about("Get the visible carousel slots")
                .arg(
                    Arg::new("index")
                        .short('i')
                        .long("index")
                        .default_value("0")
                        .value_parser(value_parser!(usize))
                        .help("Index of the focused playlist"),
                ),
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_subcommand_is_well_formed() {
        init_get_subcommand().debug_assert();
    }

    #[test]
    fn parse_playlists_arguments() {
        let matches = init_get_subcommand()
            .try_get_matches_from(["get", "playlists", "--mode", "alphabetical", "-c", "Beverages"])
            .unwrap();
        let (cmd, args) = matches.subcommand().unwrap();
        assert_eq!(cmd, "playlists");
        assert_eq!(
            args.get_one::<SortMode>("mode"),
            Some(&SortMode::Alphabetical)
        );
        assert_eq!(
            args.get_one::<String>("category").map(String::as_str),
            Some("Beverages")
        );
    }

    #[test]
    fn carousel_index_defaults_to_zero() {
        let matches = init_get_subcommand()
            .try_get_matches_from(["get", "carousel"])
            .unwrap();
        let (_, args) = matches.subcommand().unwrap();
        assert_eq!(args.get_one::<usize>("index"), Some(&0));
    }

    #[test]
    fn reject_unknown_mode() {
        assert!(init_get_subcommand()
            .try_get_matches_from(["get", "playlists", "--mode", "random"])
            .is_err());
    }
}
