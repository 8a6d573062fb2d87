/// Interactive menu loop
///
/// A numbered menu (1-6) over stdin/stdout: add, view, update, delete,
/// toggle completion, exit. The loop blocks on user input between
/// operations and exits cleanly on EOF. Reader and writer are generic so
/// tests can drive the full loop with scripted input.
///
/// # Example
///
/// ```no_run
/// use taskdeck_cli::{menu, store::TaskStore};
/// use std::io;
///
/// # fn example() -> io::Result<()> {
/// let mut store = TaskStore::new();
/// let stdin = io::stdin();
/// menu::run(&mut store, &mut stdin.lock(), &mut io::stdout())?;
/// # Ok(())
/// # }
/// ```

use std::io::{self, BufRead, Write};

use crate::store::{StoreError, TaskStore};

/// Runs the menu loop until the user exits or input ends
pub fn run<R: BufRead, W: Write>(
    store: &mut TaskStore,
    input: &mut R,
    output: &mut W,
) -> io::Result<()> {
    loop {
        write_menu(output)?;

        let Some(choice) = read_line(input)? else {
            // EOF: behave like exit
            return Ok(());
        };

        match choice.trim() {
            "1" => add_task(store, input, output)?,
            "2" => view_tasks(store, output)?,
            "3" => update_task(store, input, output)?,
            "4" => delete_task(store, input, output)?,
            "5" => toggle_task(store, input, output)?,
            "6" => {
                writeln!(output, "\nGoodbye!")?;
                return Ok(());
            }
            other => {
                writeln!(
                    output,
                    "\n✗ Error: '{}' is not a valid option. Please choose 1-6.",
                    other
                )?;
            }
        }
    }
}

fn write_menu<W: Write>(output: &mut W) -> io::Result<()> {
    writeln!(output, "\n=== Taskdeck ===")?;
    writeln!(output, "1. Add Task")?;
    writeln!(output, "2. View All Tasks")?;
    writeln!(output, "3. Update Task")?;
    writeln!(output, "4. Delete Task")?;
    writeln!(output, "5. Mark Task Complete/Incomplete")?;
    writeln!(output, "6. Exit")?;
    write!(output, "Choose an option: ")?;
    output.flush()
}

/// Reads one line; None on EOF
fn read_line<R: BufRead>(input: &mut R) -> io::Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
}

/// Prompts for a line; None on EOF
fn prompt<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    message: &str,
) -> io::Result<Option<String>> {
    write!(output, "{}", message)?;
    output.flush()?;
    read_line(input)
}

/// Prompts for a numeric task id; None on EOF or invalid input
fn prompt_id<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    message: &str,
) -> io::Result<Option<u64>> {
    let Some(raw) = prompt(input, output, message)? else {
        return Ok(None);
    };

    match raw.trim().parse::<u64>() {
        Ok(id) => Ok(Some(id)),
        Err(_) => {
            writeln!(output, "\n✗ Error: Invalid ID format. Please enter a numeric ID.")?;
            Ok(None)
        }
    }
}

fn write_item<W: Write>(output: &mut W, item: &crate::store::TodoItem) -> io::Result<()> {
    writeln!(output, "{}", item.summary())?;
    if !item.description.is_empty() {
        writeln!(output, "    Description: {}", item.description)?;
    }
    Ok(())
}

fn add_task<R: BufRead, W: Write>(
    store: &mut TaskStore,
    input: &mut R,
    output: &mut W,
) -> io::Result<()> {
    let Some(title) = prompt(input, output, "\nEnter task title: ")? else {
        return Ok(());
    };
    let Some(description) =
        prompt(input, output, "Enter description (optional, press Enter to skip): ")?
    else {
        return Ok(());
    };

    match store.add(&title, &description) {
        Ok(item) => {
            writeln!(output, "\n✓ Task added successfully! (ID: {})", item.id)?;
        }
        Err(e) => {
            writeln!(output, "\n✗ Error: {}", e)?;
        }
    }
    Ok(())
}

fn view_tasks<W: Write>(store: &TaskStore, output: &mut W) -> io::Result<()> {
    writeln!(output, "\n=== Your Tasks ===\n")?;

    let tasks = store.list();
    if tasks.is_empty() {
        writeln!(output, "No tasks yet. Add one to get started!")?;
        return Ok(());
    }

    for task in &tasks {
        write_item(output, task)?;
    }

    let complete = tasks.iter().filter(|t| t.completed).count();
    let incomplete = tasks.len() - complete;
    writeln!(
        output,
        "\nTotal: {} tasks ({} incomplete, {} complete)",
        tasks.len(),
        incomplete,
        complete
    )?;
    Ok(())
}

fn update_task<R: BufRead, W: Write>(
    store: &mut TaskStore,
    input: &mut R,
    output: &mut W,
) -> io::Result<()> {
    let Some(id) = prompt_id(input, output, "\nEnter task ID to update: ")? else {
        return Ok(());
    };

    let Some(current) = store.get(id) else {
        writeln!(output, "\n✗ Error: Task ID {} not found.", id)?;
        return Ok(());
    };

    writeln!(output, "\nCurrent task:")?;
    write_item(output, current)?;
    writeln!(output, "\nPress Enter to keep the current value.")?;

    let Some(title_input) = prompt(input, output, "New title: ")? else {
        return Ok(());
    };
    let Some(description_input) = prompt(input, output, "New description: ")? else {
        return Ok(());
    };

    let title = (!title_input.trim().is_empty()).then_some(title_input.as_str());
    let description = (!description_input.trim().is_empty()).then_some(description_input.as_str());

    if title.is_none() && description.is_none() {
        writeln!(output, "\n✗ No changes made. Both fields were left unchanged.")?;
        return Ok(());
    }

    match store.update(id, title, description) {
        Ok(item) => {
            writeln!(output, "\n✓ Task updated successfully!")?;
            let item = item.clone();
            write_item(output, &item)?;
        }
        Err(e) => {
            writeln!(output, "\n✗ Error: {}", e)?;
        }
    }
    Ok(())
}

fn delete_task<R: BufRead, W: Write>(
    store: &mut TaskStore,
    input: &mut R,
    output: &mut W,
) -> io::Result<()> {
    let Some(id) = prompt_id(input, output, "\nEnter task ID to delete: ")? else {
        return Ok(());
    };

    let Some(task) = store.get(id) else {
        writeln!(output, "\n✗ Error: Task ID {} not found.", id)?;
        return Ok(());
    };

    writeln!(output, "\nTask to be deleted:")?;
    write_item(output, task)?;

    let Some(confirm) = prompt(input, output, "Are you sure? (y/n): ")? else {
        return Ok(());
    };

    if confirm.trim().eq_ignore_ascii_case("y") {
        match store.delete(id) {
            Ok(removed) => {
                writeln!(output, "\n✓ Task deleted: {}", removed.title)?;
            }
            Err(e) => {
                writeln!(output, "\n✗ Error: {}", e)?;
            }
        }
    } else {
        writeln!(output, "\n✗ Deletion cancelled.")?;
    }
    Ok(())
}

fn toggle_task<R: BufRead, W: Write>(
    store: &mut TaskStore,
    input: &mut R,
    output: &mut W,
) -> io::Result<()> {
    let Some(id) = prompt_id(input, output, "\nEnter task ID to toggle: ")? else {
        return Ok(());
    };

    match store.toggle_complete(id) {
        Ok(item) => {
            writeln!(output, "\n✓ Task status updated!")?;
            let item = item.clone();
            write_item(output, &item)?;
        }
        Err(StoreError::NotFound(id)) => {
            writeln!(output, "\n✗ Error: Task ID {} not found.", id)?;
        }
        Err(e) => {
            writeln!(output, "\n✗ Error: {}", e)?;
        }
    }
    Ok(())
}
