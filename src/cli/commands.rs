//! Task commands
//!
//! Each command reads the todo file, applies one list operation and, for
//! mutations, writes the file back.

use anyhow::{anyhow, Result};

use super::app::ListArgs;
use super::output::Output;
use crate::domain::{Priority, PriorityFilter, Query, Report, Term, TodoList};
use crate::storage::{Config, TodoFile};

/// Everything a command needs: where the list lives and how to print
pub struct Session<'a> {
    store: TodoFile,
    case_sensitive: bool,
    output: &'a Output,
}

impl<'a> Session<'a> {
    pub fn new(store: TodoFile, config: &Config, output: &'a Output) -> Self {
        Self {
            store,
            case_sensitive: config.case_sensitive,
            output,
        }
    }

    fn load(&self) -> Result<TodoList> {
        self.store.read()
    }

    fn save(&self, list: &TodoList) -> Result<()> {
        self.store.write(list)
    }
}

fn not_found(id: u32) -> anyhow::Error {
    anyhow!("No task with id {}", id)
}

/// Shell-friendly negation: `~java` means `-java`
fn negation(word: &str) -> String {
    match word.strip_prefix('~') {
        Some(rest) => format!("-{}", rest),
        None => word.to_string(),
    }
}

/// Turns `python|@tests` into an OR-set, anything else into a single word
fn parse_term(arg: &str) -> Term {
    if arg.contains('|') {
        Term::any_of(arg.split('|').map(negation))
    } else {
        Term::word(negation(arg))
    }
}

pub fn add(session: &Session, text: &str) -> Result<()> {
    let mut list = session.load()?;
    let item = list
        .add(text)
        .cloned()
        .ok_or_else(|| anyhow!("Task text is empty"))?;
    session.save(&list)?;

    if session.output.is_json() {
        session.output.task(&item);
    } else {
        session.output.success(&item.to_line(true));
        session
            .output
            .success(&format!("TODO: {} added.", item.id.unwrap_or_default()));
    }
    Ok(())
}

pub fn complete(session: &Session, ids: &[u32]) -> Result<()> {
    let mut list = session.load()?;
    if let Some(&missing) = ids.iter().find(|&&id| list.find_by_id(id).is_none()) {
        return Err(not_found(missing));
    }

    list.complete_all(ids);
    session.save(&list)?;

    for &id in ids {
        if let Some(item) = list.find_by_id(id) {
            session.output.task(item);
            if !session.output.is_json() {
                session.output.success(&format!("TODO: {} marked as done.", id));
            }
        }
    }
    Ok(())
}

pub fn list(session: &Session, args: &ListArgs, include_completed: bool) -> Result<()> {
    let list = session.load()?;

    let mut query = Query::new()
        .case_sensitive(args.case_sensitive || session.case_sensitive)
        .include_completed(include_completed);
    for term in &args.terms {
        query = query.term(parse_term(term));
    }
    if let Some(priority) = &args.priority {
        query = query.priority(priority.parse::<PriorityFilter>()?);
    }

    let found = list.list(&query);
    session.output.tasks(&found, list.len(), list.source());
    Ok(())
}

pub fn append(session: &Session, id: u32, text: &str) -> Result<()> {
    let mut list = session.load()?;
    let item = list.append(id, text).cloned().ok_or_else(|| not_found(id))?;
    session.save(&list)?;
    session.output.task(&item);
    Ok(())
}

pub fn prepend(session: &Session, id: u32, text: &str) -> Result<()> {
    let mut list = session.load()?;
    let item = list.prepend(id, text).cloned().ok_or_else(|| not_found(id))?;
    session.save(&list)?;
    session.output.task(&item);
    Ok(())
}

pub fn replace(session: &Session, id: u32, text: &str) -> Result<()> {
    let mut list = session.load()?;
    if list.find_by_id(id).is_none() {
        return Err(not_found(id));
    }

    let item = list
        .replace(id, text)
        .cloned()
        .ok_or_else(|| anyhow!("Replacement text is empty"))?;
    session.save(&list)?;
    session.output.task(&item);
    Ok(())
}

pub fn prioritise(session: &Session, id: u32, priority: &str) -> Result<()> {
    let priority: Priority = priority.parse()?;

    let mut list = session.load()?;
    let item = list
        .prioritise(id, priority)
        .cloned()
        .ok_or_else(|| not_found(id))?;
    session.save(&list)?;

    session.output.task(&item);
    if !session.output.is_json() {
        session
            .output
            .success(&format!("TODO: {} prioritized ({}).", id, priority));
    }
    Ok(())
}

pub fn deprioritise(session: &Session, id: u32) -> Result<()> {
    let mut list = session.load()?;
    let item = list.deprioritise(id).cloned().ok_or_else(|| not_found(id))?;
    session.save(&list)?;

    session.output.task(&item);
    if !session.output.is_json() {
        session.output.success(&format!("TODO: {} deprioritized.", id));
    }
    Ok(())
}

pub fn remove(session: &Session, id: u32) -> Result<()> {
    let mut list = session.load()?;
    let item = list.remove(id).ok_or_else(|| not_found(id))?;
    session.save(&list)?;

    if session.output.is_json() {
        session.output.task(&item);
    } else {
        session.output.success(&format!("{}: {}", id, item));
        session.output.success(&format!("TODO: {} deleted.", id));
    }
    Ok(())
}

pub fn deduplicate(session: &Session) -> Result<()> {
    let mut list = session.load()?;
    let removed = list.deduplicate();
    if removed > 0 {
        session.save(&list)?;
    }

    if session.output.is_json() {
        session.output.data(&serde_json::json!({ "removed": removed }));
    } else if removed == 0 {
        session.output.success("TODO: No duplicate tasks found.");
    } else {
        session
            .output
            .success(&format!("TODO: {} duplicate task(s) removed.", removed));
    }
    Ok(())
}

pub fn projects(session: &Session) -> Result<()> {
    let list = session.load()?;
    session.output.names(&list.projects());
    Ok(())
}

pub fn contexts(session: &Session) -> Result<()> {
    let list = session.load()?;
    session.output.names(&list.contexts());
    Ok(())
}

pub fn report(session: &Session) -> Result<()> {
    let list = session.load()?;
    let report = Report::from_list(&list);

    if session.output.is_json() {
        session.output.data(&report);
        return Ok(());
    }

    println!("Report for {}", report.source);
    println!("{}", "-".repeat(40));
    println!("{:<12} {}", "Total", report.total);
    println!("{:<12} {}", "Open", report.open);
    println!("{:<12} {}", "Done", report.completed);

    let sections = [
        ("Priority", &report.by_priority),
        ("Projects", &report.by_project),
        ("Contexts", &report.by_context),
    ];
    for (title, counts) in sections {
        if counts.is_empty() {
            continue;
        }
        println!();
        println!("{}:", title);
        for (name, count) in counts {
            println!("  {:<20} {}", name, count);
        }
    }

    Ok(())
}
