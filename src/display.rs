use anyhow::Result;
use crossterm::{
    style::{style, Attribute, Color, PrintStyledContent},
    QueueableCommand,
};

use std::io::{stdout, Write};

use tictactoe_ai::board::{BoardState, Cell};

/// Draws the board with colored marks, numbering empty cells from 1 for input
pub fn display(board: &BoardState) -> Result<()> {
    let mut stdout = stdout();
    let size = board.size();
    let separator = format!("{}+\n", "+---".repeat(size));

    stdout.queue(PrintStyledContent(style(separator.clone())))?;
    for (row_index, row) in board.cells().chunks(size).enumerate() {
        for (column, cell) in row.iter().enumerate() {
            let index = row_index * size + column;
            let content = match cell {
                Cell::Empty => style(format!("{:^3}", index + 1)).with(Color::DarkGrey),
                Cell::X => style(format!("{:^3}", "X"))
                    .attribute(Attribute::Bold)
                    .with(Color::Red),
                Cell::O => style(format!("{:^3}", "O"))
                    .attribute(Attribute::Bold)
                    .with(Color::Yellow),
            };
            stdout
                .queue(PrintStyledContent(style("|")))?
                .queue(PrintStyledContent(content))?;
        }
        stdout
            .queue(PrintStyledContent(style("|\n")))?
            .queue(PrintStyledContent(style(separator.clone())))?;
    }
    stdout.flush()?;
    Ok(())
}
