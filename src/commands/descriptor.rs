use serenity::all::{CommandOptionType, CreateCommand, CreateCommandOption};

const MAX_NAME_LENGTH: usize = 32;
const MAX_DESCRIPTION_LENGTH: usize = 100;
const MAX_OPTIONS: usize = 25;

#[derive(Clone, Debug)]
pub struct CommandOptionDescriptor {
    pub name: String,
    pub description: String,
    pub kind: CommandOptionType,
    pub required: bool,
    pub min_value: Option<f64>,
    pub max_value: Option<f64>,
    pub min_length: Option<u16>,
    pub max_length: Option<u16>,
    pub choices: Vec<(String, String)>, // (name, value) for string choices
}

#[allow(dead_code)]
impl CommandOptionDescriptor {
    pub fn new(kind: CommandOptionType, name: &str, description: &str) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            kind,
            required: false,
            min_value: None,
            max_value: None,
            min_length: None,
            max_length: None,
            choices: vec![],
        }
    }

    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }
}

/// The metadata Discord needs to present a slash command to users.
#[derive(Clone, Debug)]
pub struct CommandDescriptor {
    pub name: String,
    pub description: String,
    pub options: Vec<CommandOptionDescriptor>,
}

impl CommandDescriptor {
    pub fn new(name: &str, description: &str) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            options: vec![],
        }
    }

    #[allow(dead_code)]
    pub fn add_option(mut self, option: CommandOptionDescriptor) -> Self {
        self.options.push(option);
        self
    }

    /// Checks the constraints Discord enforces on registration, so that a bad
    /// descriptor is caught at load time rather than failing the bulk upload.
    pub fn validate(&self) -> anyhow::Result<()> {
        validate_name("name", &self.name)?;
        validate_description("description", &self.description)?;

        if self.options.len() > MAX_OPTIONS {
            anyhow::bail!(
                "options: {} options given, at most {MAX_OPTIONS} are allowed",
                self.options.len()
            );
        }

        let mut seen_optional = false;
        for opt in &self.options {
            validate_name("option name", &opt.name)?;
            validate_description(
                &format!("option `{}` description", opt.name),
                &opt.description,
            )?;

            if opt.required && seen_optional {
                anyhow::bail!(
                    "option `{}`: required options must come before optional ones",
                    opt.name
                );
            }
            seen_optional |= !opt.required;
        }

        Ok(())
    }

    pub fn to_discord_command(&self) -> CreateCommand {
        let mut cmd = CreateCommand::new(&self.name).description(&self.description);

        for opt in &self.options {
            let mut option = CreateCommandOption::new(opt.kind, &opt.name, &opt.description)
                .required(opt.required);

            if let Some(min_value) = opt.min_value {
                option = option.min_number_value(min_value);
            }
            if let Some(max_value) = opt.max_value {
                option = option.max_number_value(max_value);
            }
            if let Some(min_length) = opt.min_length {
                option = option.min_length(min_length);
            }
            if let Some(max_length) = opt.max_length {
                option = option.max_length(max_length);
            }

            for (choice_name, choice_value) in &opt.choices {
                option = option.add_string_choice(choice_name, choice_value);
            }

            cmd = cmd.add_option(option);
        }

        cmd
    }
}

fn validate_name(field: &str, name: &str) -> anyhow::Result<()> {
    let length = name.chars().count();
    if length == 0 {
        anyhow::bail!("{field}: missing");
    }
    if length > MAX_NAME_LENGTH {
        anyhow::bail!("{field}: `{name}` is longer than {MAX_NAME_LENGTH} characters");
    }
    if let Some(c) = name
        .chars()
        .find(|c| !(c.is_alphanumeric() || *c == '-' || *c == '_') || c.is_uppercase())
    {
        anyhow::bail!("{field}: `{name}` contains disallowed character {c:?}");
    }
    Ok(())
}

fn validate_description(field: &str, description: &str) -> anyhow::Result<()> {
    let length = description.chars().count();
    if length == 0 {
        anyhow::bail!("{field}: missing");
    }
    if length > MAX_DESCRIPTION_LENGTH {
        anyhow::bail!("{field}: longer than {MAX_DESCRIPTION_LENGTH} characters");
    }
    Ok(())
}
