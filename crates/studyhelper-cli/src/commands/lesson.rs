//! Lesson management commands for CLI.

use clap::Subcommand;
use studyhelper_core::{LessonFields, LessonId};

use super::{open_session, report_miss, CliResult, ScopeArgs};

#[derive(Subcommand)]
pub enum LessonAction {
    /// Add a lesson to a template weekday or a date
    Add {
        #[command(flatten)]
        scope: ScopeArgs,
        /// Lesson title
        title: String,
        /// Start time (HH:MM)
        start: String,
        /// End time (HH:MM)
        end: String,
        #[arg(long, default_value = "")]
        room: String,
        #[arg(long, default_value = "")]
        teacher: String,
    },
    /// Replace a lesson's title, times, room and teacher
    Edit {
        #[command(flatten)]
        scope: ScopeArgs,
        /// Lesson ID
        id: LessonId,
        title: String,
        start: String,
        end: String,
        #[arg(long, default_value = "")]
        room: String,
        #[arg(long, default_value = "")]
        teacher: String,
    },
    /// Delete a lesson
    Delete {
        #[command(flatten)]
        scope: ScopeArgs,
        /// Lesson ID
        id: LessonId,
    },
}

pub fn run(action: LessonAction) -> CliResult {
    let mut session = open_session()?;

    match action {
        LessonAction::Add {
            scope,
            title,
            start,
            end,
            room,
            teacher,
        } => {
            let fields = LessonFields::new(title, start, end)
                .with_room(room)
                .with_teacher(teacher);
            let id = session.add_lesson(scope.selector(), fields)?;
            println!("Lesson added: {id}");
        }
        LessonAction::Edit {
            scope,
            id,
            title,
            start,
            end,
            room,
            teacher,
        } => {
            let fields = LessonFields::new(title, start, end)
                .with_room(room)
                .with_teacher(teacher);
            let found = session.edit_lesson(scope.selector(), id, fields)?;
            report_miss(found, scope.selector(), id);
            if found {
                println!("Lesson updated: {id}");
            }
        }
        LessonAction::Delete { scope, id } => {
            let found = session.delete_lesson(scope.selector(), id)?;
            report_miss(found, scope.selector(), id);
            if found {
                println!("Lesson deleted: {id}");
            }
        }
    }
    Ok(())
}
