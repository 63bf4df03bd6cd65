//! Add/edit dialog for one diagram of a roundtrip.

use client_core::{RequestFailure, RoundtripApi};
use shared::{
    domain::{BpmnDiagram, ConnectorNode, NodeType, Side},
    error::ApiError,
    protocol::AppEvent,
};
use tracing::{debug, warn};

use crate::error::FormError;

/// Modeler reserved for the right hand side when no other is named.
pub const FOX_DESIGNER: &str = "fox designer";

#[derive(Debug, Clone)]
pub struct EditDiagramController {
    side: Side,
    diagram: BpmnDiagram,
    modeler_names: Vec<String>,
    selected_node: Option<ConnectorNode>,
    form_valid: Option<bool>,
    error: Option<ApiError>,
}

impl EditDiagramController {
    /// Edits a copy of `existing`, or a blank diagram when adding.
    pub fn new(side: Side, existing: Option<&BpmnDiagram>) -> Self {
        let mut controller = Self {
            side,
            diagram: existing.cloned().unwrap_or_default(),
            modeler_names: Vec::new(),
            selected_node: None,
            form_valid: None,
            error: None,
        };
        if !controller.can_edit_modeler() {
            controller.diagram.modeler = Some(FOX_DESIGNER.to_string());
        }
        controller
    }

    pub fn can_edit_modeler(&self) -> bool {
        self.side != Side::RightHandSide
            || self
                .diagram
                .modeler
                .as_deref()
                .is_some_and(|modeler| !modeler.is_empty() && modeler != FOX_DESIGNER)
    }

    /// A failed load is kept as the component error of the dialog.
    pub async fn load_modeler_names<A>(&mut self, api: &A) -> Result<(), RequestFailure>
    where
        A: RoundtripApi + ?Sized,
    {
        match api.modeler_names().await {
            Ok(names) => {
                self.modeler_names_loaded(names);
                Ok(())
            }
            Err(err) => {
                warn!(side = self.side.as_str(), "failed to load modeler names: {err}");
                self.error = Some(err.to_api_error());
                Err(err)
            }
        }
    }

    /// Hides the reserved modeler from the choices and preselects the first
    /// remaining one when the modeler is editable.
    pub fn modeler_names_loaded(&mut self, mut names: Vec<String>) {
        if let Some(pos) = names.iter().rposition(|name| name == FOX_DESIGNER) {
            names.remove(pos);
        }
        if self.can_edit_modeler() {
            if let Some(first) = names.first() {
                self.diagram.modeler = Some(first.clone());
            }
        }
        debug!(count = names.len(), side = self.side.as_str(), "modeler names loaded");
        self.modeler_names = names;
    }

    pub fn set_modeler(&mut self, modeler: impl Into<String>) {
        self.diagram.modeler = Some(modeler.into());
    }

    pub fn select_node(&mut self, node: ConnectorNode) {
        self.diagram.diagram_path = Some(node.id.clone());
        self.diagram.label = Some(node.label.clone());
        self.diagram.connector_id = Some(node.connector_id);
        self.selected_node = Some(node);
    }

    /// Validity of the remaining form fields; `None` while unknown.
    pub fn set_form_valid(&mut self, valid: Option<bool>) {
        self.form_valid = valid;
    }

    pub fn handle(&mut self, event: &AppEvent) {
        if let AppEvent::ComponentError(error) = event {
            self.error = Some(error.clone());
        }
    }

    pub fn is_valid(&self) -> bool {
        let has_modeler = self
            .diagram
            .modeler
            .as_deref()
            .is_some_and(|modeler| !modeler.is_empty());
        let file_selected = self
            .selected_node
            .as_ref()
            .is_some_and(|node| node.node_type == NodeType::File);
        has_modeler && self.form_valid != Some(false) && file_selected
    }

    /// Returns the edited diagram for saving into the roundtrip.
    pub fn save(&self) -> Result<BpmnDiagram, FormError> {
        if !self.is_valid() {
            return Err(FormError::NotValid);
        }
        Ok(self.diagram.clone())
    }

    pub fn side(&self) -> Side {
        self.side
    }

    pub fn diagram(&self) -> &BpmnDiagram {
        &self.diagram
    }

    pub fn modeler_names(&self) -> &[String] {
        &self.modeler_names
    }

    pub fn error(&self) -> Option<&ApiError> {
        self.error.as_ref()
    }
}
