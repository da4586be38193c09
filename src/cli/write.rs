use std::io::{BufRead, BufReader};
use std::path::PathBuf;

use clap::Args;

use crate::execute::{CreateRequest, execute};

#[derive(Args, Debug)]
pub(super) struct WriteArgs {
    /// Name of the file to create
    name: String,

    /// Lines to write, in order
    lines: Vec<String>,

    /// Directory to create and write into
    #[arg(short, long)]
    dir: Option<String>,

    /// Read additional lines from this file ("-" for stdin), appended after LINES
    #[arg(short, long)]
    input: Option<PathBuf>,
}

impl WriteArgs {
    fn into_request(self) -> Result<CreateRequest, super::Error> {
        let mut lines = self.lines;
        if let Some(input) = &self.input {
            let reader = BufReader::new(super::open_input(Some(input.as_path()))?);
            for line in reader.lines() {
                lines.push(line?);
            }
        }

        let request = CreateRequest::new(self.name).with_lines(lines);
        Ok(match self.dir {
            Some(dir) => request.with_directory(dir),
            None => request,
        })
    }

    pub fn handle(self) -> Result<(), super::Error> {
        let request = self.into_request()?;
        let path = execute(&request)?;
        println!("{path}");
        Ok(())
    }
}
