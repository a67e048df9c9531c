use std::io::{BufRead, Write};

use anyhow::Result;

use carnet_lib::review::algorithm::preview_intervals;
use carnet_lib::review::{format_interval, Recall};

use crate::app::App;
use crate::render::terminal::{paint, progress_bar, render_answer, render_question, Color};

/// What the user typed at a prompt
enum Input {
    Line(String),
    Quit,
}

fn prompt<R: BufRead, W: Write>(input: &mut R, out: &mut W, text: &str) -> Result<Input> {
    write!(out, "{} ", text)?;
    out.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(Input::Quit);
    }
    let line = line.trim().to_lowercase();
    if line == "q" || line == "quit" {
        return Ok(Input::Quit);
    }
    Ok(Input::Line(line))
}

fn parse_recall(answer: &str) -> Option<Recall> {
    match answer {
        "y" | "yes" | "1" => Some(Recall::Remembered),
        "n" | "no" | "0" => Some(Recall::Forgot),
        _ => None,
    }
}

pub fn run<R: BufRead, W: Write>(
    app: &mut App,
    input: &mut R,
    out: &mut W,
    use_color: bool,
) -> Result<()> {
    app.start_review()?;

    loop {
        let entry = match app.scheduler.current(&app.store) {
            Some((_, entry)) => entry.clone(),
            None => break,
        };

        if let Some(session) = app.scheduler.session() {
            let (done, total) = session.progress();
            writeln!(out, "\n{}", progress_bar(done, total, 30))?;
        }
        writeln!(out, "{}", render_question(&entry, use_color))?;

        // QUESTION: wait for the reveal
        match prompt(input, out, "[Enter] reveal  [q] quit >")? {
            Input::Quit => return leave(app, out),
            Input::Line(_) => {}
        }

        let (_, revealed) = app.scheduler.reveal_answer(&app.store)?;
        writeln!(out, "{}", render_answer(revealed, use_color))?;

        // ANSWER: wait for a grade
        let [forgot_days, remembered_days] =
            preview_intervals(entry.interval, app.config.review.growth_factor);
        let question = format!(
            "[y] remembered ({})  [n] forgot ({})  [q] quit >",
            format_interval(remembered_days),
            format_interval(forgot_days)
        );
        let recall = loop {
            match prompt(input, out, &question)? {
                Input::Quit => return leave(app, out),
                Input::Line(answer) => match parse_recall(&answer) {
                    Some(recall) => break recall,
                    None => writeln!(out, "Please answer y or n.")?,
                },
            }
        };

        let graded = app.grade(recall)?;
        let verdict = match graded.recall {
            Recall::Remembered => paint("Remembered", Color::GREEN, use_color),
            Recall::Forgot => paint("Forgot", Color::RED, use_color),
        };
        writeln!(
            out,
            "{}: '{}' comes back on {} (in {})",
            verdict,
            graded.word,
            graded.result.next_review.format("%Y-%m-%d"),
            format_interval(graded.result.interval)
        )?;
    }

    let total = app.scheduler.session().map(|s| s.progress().1).unwrap_or(0);
    if total == 0 {
        writeln!(out, "Nothing is due today.")?;
    } else {
        writeln!(
            out,
            "{}",
            paint("C'est fini! Today's review is finished.", Color::BOLD, use_color)
        )?;
    }

    Ok(())
}

fn leave<W: Write>(app: &mut App, out: &mut W) -> Result<()> {
    app.leave_review()?;
    if let Some(session) = app.scheduler.session() {
        writeln!(
            out,
            "\nStopped with {} words left for today. Run `carnet-cli review` to continue.",
            session.remaining_len()
        )?;
    }
    Ok(())
}
