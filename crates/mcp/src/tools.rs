use sandbox_fs_core::{get_file_info, list_directory, read_file, OperationError, PathGuard};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::transport::text_content;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    #[serde(rename = "inputSchema")]
    pub input_schema: Value,
}

/// The fixed set of operations this server exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tool {
    ReadFile,
    ListDirectory,
    GetFileInfo,
}

impl Tool {
    pub const ALL: [Tool; 3] = [Tool::ReadFile, Tool::ListDirectory, Tool::GetFileInfo];

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|tool| tool.name() == name)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Tool::ReadFile => "read_file",
            Tool::ListDirectory => "list_directory",
            Tool::GetFileInfo => "get_file_info",
        }
    }

    pub fn definition(&self) -> ToolDefinition {
        let (description, input_schema) = match self {
            Tool::ReadFile => (
                "Read the contents of a file within the allowed root",
                json!({
                    "type": "object",
                    "properties": {
                        "path": {
                            "type": "string",
                            "description": "Path to the file to read"
                        }
                    },
                    "required": ["path"]
                }),
            ),
            Tool::ListDirectory => (
                "List contents of a directory within the allowed root",
                json!({
                    "type": "object",
                    "properties": {
                        "path": {
                            "type": "string",
                            "description": "Path to the directory to list (defaults to the allowed root)"
                        }
                    }
                }),
            ),
            Tool::GetFileInfo => (
                "Get information about a file or directory within the allowed root",
                json!({
                    "type": "object",
                    "properties": {
                        "path": {
                            "type": "string",
                            "description": "Path to get info for"
                        }
                    },
                    "required": ["path"]
                }),
            ),
        };

        ToolDefinition {
            name: self.name().to_string(),
            description: description.to_string(),
            input_schema,
        }
    }

    /// Run the tool against `arguments` and wrap its text in a content block.
    pub fn call(&self, guard: &PathGuard, arguments: Value) -> Result<Value, OperationError> {
        let args = PathArgs::parse(arguments)?;

        let text = match self {
            Tool::ReadFile => read_file(guard, args.required()?)?,
            Tool::ListDirectory => list_directory(guard, args.path.as_deref())?,
            Tool::GetFileInfo => get_file_info(guard, args.required()?)?,
        };

        Ok(text_content(text))
    }
}

pub fn list_tools() -> Vec<ToolDefinition> {
    Tool::ALL.iter().map(Tool::definition).collect()
}

#[derive(Debug, Default, Deserialize)]
struct PathArgs {
    path: Option<String>,
}

impl PathArgs {
    fn parse(arguments: Value) -> Result<Self, OperationError> {
        if arguments.is_null() {
            return Ok(Self::default());
        }
        serde_json::from_value(arguments).map_err(|e| OperationError::InvalidArguments(e.to_string()))
    }

    fn required(&self) -> Result<&str, OperationError> {
        self.path
            .as_deref()
            .ok_or(OperationError::MissingArgument("path"))
    }
}
