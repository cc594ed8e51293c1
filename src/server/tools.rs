//! MCP tool handlers for MIT tracking.

use crate::mit::{
    adapters::sqlite::SqliteMitRepository,
    domain::{MitChanges, MitDate, MitDomainError, MitId},
    services::{CreateMitRequest, MitFilter, MitService},
};
use mockable::DefaultClock;
use rmcp::handler::server::router::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{CallToolResult, Content, Implementation, ServerCapabilities, ServerInfo};
use rmcp::{ErrorData as McpError, ServerHandler, tool, tool_handler, tool_router};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// MIT service type the server binary wires up: SQLite persistence with the
/// system clock.
pub type ServerMitService = MitService<SqliteMitRepository<DefaultClock>, DefaultClock>;

/// Parameters for the `create_mit` tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateMitParams {
    /// Description of the MIT.
    #[schemars(length(min = 1))]
    pub description: String,
    /// Display order within the date; the next sequential number is
    /// assigned when omitted.
    #[schemars(range(min = 0))]
    pub order: Option<i32>,
    /// Target date in YYYY-MM-DD format.
    #[schemars(regex(pattern = r"^\d{4}-\d{2}-\d{2}$"))]
    pub date: String,
}

/// Parameters for the `list_mits` tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ListMitsParams {
    /// Date in YYYY-MM-DD format; all dates are listed when omitted.
    #[schemars(regex(pattern = r"^\d{4}-\d{2}-\d{2}$"))]
    pub date: Option<String>,
}

/// Parameters for the `find_mits` tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct FindMitsParams {
    /// Inclusive start of the date range in YYYY-MM-DD format. When both
    /// bounds are omitted the query targets today.
    #[schemars(regex(pattern = r"^\d{4}-\d{2}-\d{2}$"))]
    pub start_date: Option<String>,
    /// Inclusive end of the date range in YYYY-MM-DD format.
    #[schemars(regex(pattern = r"^\d{4}-\d{2}-\d{2}$"))]
    pub end_date: Option<String>,
    /// Restrict results to completed or incomplete MITs.
    pub completed: Option<bool>,
    /// Maximum number of rows to return (default 100).
    #[schemars(range(min = 1, max = 10000))]
    pub limit: Option<i64>,
}

/// Parameters for the `update_mit` tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMitParams {
    /// Identifier of the MIT to update (UUID).
    pub id: String,
    /// Replacement description.
    #[schemars(length(min = 1))]
    pub description: Option<String>,
    /// Replacement completion flag.
    pub completed: Option<bool>,
    /// Replacement display order.
    #[schemars(range(min = 0))]
    pub order: Option<i32>,
    /// Replacement date in YYYY-MM-DD format.
    #[schemars(regex(pattern = r"^\d{4}-\d{2}-\d{2}$"))]
    pub date: Option<String>,
}

/// Parameters for the `delete_mit` tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeleteMitParams {
    /// Identifier of the MIT to delete (UUID).
    pub id: String,
}

/// MCP server handler exposing the MIT tracking tools.
#[derive(Clone)]
pub struct MitToolServer {
    service: ServerMitService,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl MitToolServer {
    /// Creates a handler over a wired-up MIT service.
    #[must_use]
    pub fn new(service: ServerMitService) -> Self {
        Self {
            service,
            tool_router: Self::tool_router(),
        }
    }

    /// Creates a MIT after the service validates the creation rules.
    #[tool(description = "Create a new MIT")]
    pub async fn create_mit(
        &self,
        Parameters(params): Parameters<CreateMitParams>,
    ) -> Result<CallToolResult, McpError> {
        let date = match MitDate::parse(&params.date) {
            Ok(date) => date,
            Err(err) => return Ok(error_text(format!("Error creating MIT: {err}"))),
        };

        let mut request = CreateMitRequest::new(params.description, date);
        if let Some(order) = params.order {
            request = request.with_order(order);
        }

        match self.service.create(request).await {
            Ok(mit) => json_content(&mit),
            Err(err) => Ok(error_text(format!("Error creating MIT: {err}"))),
        }
    }

    /// Lists every MIT, or the MITs for one date.
    #[tool(description = "List all MITs or MITs for a specific date")]
    pub async fn list_mits(
        &self,
        Parameters(params): Parameters<ListMitsParams>,
    ) -> Result<CallToolResult, McpError> {
        let result = match params.date.as_deref().map(MitDate::parse) {
            Some(Err(err)) => return Ok(error_text(format!("Error listing MITs: {err}"))),
            Some(Ok(date)) => self.service.find_by_date(date).await,
            None => self.service.find_all().await,
        };

        match result {
            Ok(mits) => json_content(&mits),
            Err(err) => Ok(error_text(format!("Error listing MITs: {err}"))),
        }
    }

    /// Runs the general range/filter query.
    #[tool(description = "Find MITs by date range, completion state, and row limit")]
    pub async fn find_mits(
        &self,
        Parameters(params): Parameters<FindMitsParams>,
    ) -> Result<CallToolResult, McpError> {
        let mut filter = MitFilter::new();
        match parse_optional_date(params.start_date.as_deref()) {
            Ok(Some(start_date)) => filter = filter.with_start_date(start_date),
            Ok(None) => {}
            Err(err) => return Ok(error_text(format!("Error finding MITs: {err}"))),
        }
        match parse_optional_date(params.end_date.as_deref()) {
            Ok(Some(end_date)) => filter = filter.with_end_date(end_date),
            Ok(None) => {}
            Err(err) => return Ok(error_text(format!("Error finding MITs: {err}"))),
        }
        if let Some(completed) = params.completed {
            filter = filter.with_completed(completed);
        }
        if let Some(limit) = params.limit {
            filter = filter.with_limit(limit);
        }

        match self.service.find(filter).await {
            Ok(mits) => json_content(&mits),
            Err(err) => Ok(error_text(format!("Error finding MITs: {err}"))),
        }
    }

    /// Applies a partial update to a MIT.
    #[tool(description = "Update a MIT")]
    pub async fn update_mit(
        &self,
        Parameters(params): Parameters<UpdateMitParams>,
    ) -> Result<CallToolResult, McpError> {
        let id = match MitId::parse(&params.id) {
            Ok(id) => id,
            Err(err) => return Ok(error_text(format!("Error updating MIT: {err}"))),
        };

        let mut changes = MitChanges::new();
        if let Some(description) = params.description {
            changes = changes.with_description(description);
        }
        if let Some(completed) = params.completed {
            changes = changes.with_completed(completed);
        }
        if let Some(order) = params.order {
            changes = changes.with_order(order);
        }
        match parse_optional_date(params.date.as_deref()) {
            Ok(Some(date)) => changes = changes.with_date(date),
            Ok(None) => {}
            Err(err) => return Ok(error_text(format!("Error updating MIT: {err}"))),
        }

        match self.service.update(id, changes).await {
            Ok(Some(mit)) => json_content(&mit),
            Ok(None) => Ok(not_found(&params.id)),
            Err(err) => Ok(error_text(format!("Error updating MIT: {err}"))),
        }
    }

    /// Deletes a MIT by identifier.
    #[tool(description = "Delete a MIT")]
    pub async fn delete_mit(
        &self,
        Parameters(params): Parameters<DeleteMitParams>,
    ) -> Result<CallToolResult, McpError> {
        let id = match MitId::parse(&params.id) {
            Ok(id) => id,
            Err(err) => return Ok(error_text(format!("Error deleting MIT: {err}"))),
        };

        match self.service.delete(id).await {
            Ok(Some(mit)) => Ok(CallToolResult::success(vec![Content::text(format!(
                "Deleted MIT: {}",
                mit.id()
            ))])),
            Ok(None) => Ok(not_found(&params.id)),
            Err(err) => Ok(error_text(format!("Error deleting MIT: {err}"))),
        }
    }
}

#[tool_handler]
impl ServerHandler for MitToolServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation::from_build_env(),
            instructions: Some(
                "Track Most Important Tasks (MITs), a small set of date-scoped tasks. \
                 Create MITs for today or future dates, list or query them by date \
                 range and completion state, and update or delete them by id."
                    .to_owned(),
            ),
            ..ServerInfo::default()
        }
    }
}

fn parse_optional_date(value: Option<&str>) -> Result<Option<MitDate>, MitDomainError> {
    value.map(MitDate::parse).transpose()
}

fn error_text(message: String) -> CallToolResult {
    CallToolResult::error(vec![Content::text(message)])
}

fn not_found(id: &str) -> CallToolResult {
    error_text(format!("MIT with ID {id} not found"))
}

fn json_content<T: Serialize>(value: &T) -> Result<CallToolResult, McpError> {
    let rendered = serde_json::to_string_pretty(value)
        .map_err(|err| McpError::internal_error(err.to_string(), None))?;
    Ok(CallToolResult::success(vec![Content::text(rendered)]))
}
