//! Interactive session loop. Every action ends in a notice; only input
//! errors (e.g. a closed terminal) leave the loop early.

use crate::cli::presentation::{
    format_context_text, format_notice, format_questions_text, format_section_heading,
};
use crate::clipboard::Clipboard;
use crate::context::{ContextField, SocialContext};
use crate::error::ApiError;
use crate::notice::Notice;
use crate::session::{GenerationKind, Session};
use dialoguer::{Input, Select};
use tokio::runtime::Runtime;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuAction {
    Generate,
    More,
    Edit,
    CopyOne,
    CopyAll,
    ShowLink,
    Clear,
    Quit,
}

const MENU: [(MenuAction, &str); 8] = [
    (MenuAction::Generate, "Generate questions"),
    (MenuAction::More, "Generate more (avoid current questions)"),
    (MenuAction::Edit, "Edit group context"),
    (MenuAction::CopyOne, "Copy one question"),
    (MenuAction::CopyAll, "Copy all for sharing"),
    (MenuAction::ShowLink, "Show share link"),
    (MenuAction::Clear, "Clear questions"),
    (MenuAction::Quit, "Quit"),
];

const CUSTOM_VALUE: &str = "Custom...";
const CLEAR_VALUE: &str = "(clear)";

fn input_error(e: dialoguer::Error) -> ApiError {
    ApiError::ConfigError(format!("Failed to get user input: {}", e))
}

pub struct InteractiveSession<'a> {
    session: &'a Session,
    runtime: &'a Runtime,
    clipboard: &'a dyn Clipboard,
    color: bool,
}

impl<'a> InteractiveSession<'a> {
    pub fn new(
        session: &'a Session,
        runtime: &'a Runtime,
        clipboard: &'a dyn Clipboard,
        color: bool,
    ) -> Self {
        Self {
            session,
            runtime,
            clipboard,
            color,
        }
    }

    pub fn run(&self) -> Result<(), ApiError> {
        println!("{}", format_section_heading("Conversation Sparks", self.color));
        self.print_context();

        loop {
            let labels: Vec<&str> = MENU.iter().map(|(_, label)| *label).collect();
            let selection = Select::new()
                .with_prompt("What next?")
                .items(&labels)
                .default(0)
                .interact()
                .map_err(input_error)?;

            let notice = match MENU[selection].0 {
                MenuAction::Generate => self.generate(GenerationKind::Fresh),
                MenuAction::More => self.generate(GenerationKind::More),
                MenuAction::Edit => {
                    self.edit_context()?;
                    self.print_context();
                    continue;
                }
                MenuAction::CopyOne => match self.pick_question()? {
                    Some(index) => self.session.copy_question(index, self.clipboard),
                    None => Notice::info("No questions to copy yet"),
                },
                MenuAction::CopyAll => {
                    if self.session.batch().is_empty() {
                        Notice::info("No questions to copy yet")
                    } else {
                        self.session.copy_export(self.clipboard)
                    }
                }
                MenuAction::ShowLink => {
                    let query = self.session.share_query();
                    if query.is_empty() {
                        Notice::info("Nothing to share yet")
                    } else {
                        Notice::info(format!("?{}", query))
                    }
                }
                MenuAction::Clear => {
                    self.session.clear();
                    Notice::info("Questions cleared")
                }
                MenuAction::Quit => return Ok(()),
            };
            println!("{}", format_notice(&notice, self.color));
        }
    }

    fn print_context(&self) {
        println!("{}", format_context_text(&self.session.context()));
    }

    fn generate(&self, kind: GenerationKind) -> Notice {
        eprintln!("Generating...");
        let notice = self.runtime.block_on(self.session.trigger(kind));
        if !notice.is_error() {
            println!("\n{}\n", format_questions_text(&self.session.batch(), self.color));
        }
        notice
    }

    fn edit_context(&self) -> Result<(), ApiError> {
        let context = self.session.context();
        let labels: Vec<String> = ContextField::ALL
            .iter()
            .map(|field| field_menu_label(&context, *field))
            .collect();
        let selection = Select::new()
            .with_prompt("Which field?")
            .items(&labels)
            .default(0)
            .interact()
            .map_err(input_error)?;
        let field = ContextField::ALL[selection];
        let value = self.prompt_value(field, context.get(field))?;
        self.session.update(field, value);
        Ok(())
    }

    /// Suggested choices for select-style fields, free text otherwise.
    fn prompt_value(&self, field: ContextField, current: &str) -> Result<String, ApiError> {
        let choices = field.choices();
        if !choices.is_empty() {
            let mut items: Vec<&str> = choices.iter().map(|c| c.label).collect();
            items.push(CUSTOM_VALUE);
            items.push(CLEAR_VALUE);
            let default = choices
                .iter()
                .position(|c| c.value == current)
                .unwrap_or(0);
            let selection = Select::new()
                .with_prompt(field.label())
                .items(&items)
                .default(default)
                .interact()
                .map_err(input_error)?;
            if selection < choices.len() {
                return Ok(choices[selection].value.to_string());
            }
            if items[selection] == CLEAR_VALUE {
                return Ok(String::new());
            }
        }

        Input::<String>::new()
            .with_prompt(field.label())
            .with_initial_text(current)
            .allow_empty(true)
            .interact_text()
            .map_err(input_error)
    }

    fn pick_question(&self) -> Result<Option<usize>, ApiError> {
        let batch = self.session.batch();
        if batch.is_empty() {
            return Ok(None);
        }
        let items: Vec<String> = batch
            .questions()
            .iter()
            .map(|q| format!("[{}] {}", q.difficulty.label(), q.text))
            .collect();
        let selection = Select::new()
            .with_prompt("Copy which question?")
            .items(&items)
            .default(0)
            .interact()
            .map_err(input_error)?;
        Ok(Some(selection))
    }
}

fn field_menu_label(context: &SocialContext, field: ContextField) -> String {
    let value = context.get(field);
    if value.is_empty() {
        format!("{} (empty)", field.label())
    } else {
        format!("{}: {}", field.label(), field.display_value(value))
    }
}
