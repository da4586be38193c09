use std::io::{BufRead, BufReader, Read};
use std::path::PathBuf;

use clap::{Args, ValueEnum};

use crate::execute::{CreateRequest, execute_all};
use crate::writer::FileWriter;

#[derive(Debug, Clone, Copy, Default, ValueEnum)]
enum Format {
    /// One JSON request object per line
    #[default]
    Jsonl,
    /// A JSON array of request objects
    Json,
}

impl Format {
    fn parse<R: Read>(self, mut r: R) -> Result<Vec<CreateRequest>, super::Error> {
        match self {
            Self::Jsonl => BufReader::new(r)
                .lines()
                .filter(|line| !matches!(line, Ok(line) if line.trim().is_empty()))
                .map(|line| Ok(serde_json::from_str(&line?)?))
                .collect(),
            Self::Json => {
                let mut content = String::new();
                r.read_to_string(&mut content)?;
                Ok(serde_json::from_str(&content)?)
            }
        }
    }
}

#[derive(Args, Debug)]
pub(super) struct BatchArgs {
    /// File containing requests (reads from stdin if not specified or "-")
    path: Option<PathBuf>,

    /// Input format
    #[arg(short, long = "format", value_enum, default_value_t = Format::Jsonl)]
    format: Format,
}

impl BatchArgs {
    pub fn handle(self) -> Result<(), super::Error> {
        let input = super::open_input(self.path.as_deref())?;
        let requests = self.format.parse(input)?;

        let mut writer = FileWriter::physical();
        for path in execute_all(&mut writer, &requests)? {
            println!("{path}");
        }
        Ok(())
    }
}
