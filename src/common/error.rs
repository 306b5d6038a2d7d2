use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// Nosso tipo de erro, com `thiserror` para melhor ergonomia.
// As variantes de domínio carregam os dados que a regra violada conhecia.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("Funcionário {national_id} não possui o papel esperado ({expected_role})")]
    RoleMismatch {
        national_id: String,
        expected_role: String,
    },

    #[error("Uma concessionária não pode ficar sem gerente por atualização direta")]
    ManagerRequired,

    #[error("Funcionário {0} não encontrado")]
    UnknownStaff(String),

    #[error("Analista {0} não está alocado em nenhuma concessionária")]
    AnalystUnassigned(String),

    #[error(
        "Estoque insuficiente na concessionária {dealership_rif}: solicitado {requested}, disponível {available}"
    )]
    InsufficientStock {
        requested: i32,
        available: i32,
        dealership_rif: String,
    },

    #[error("Ordem de serviço {0} não encontrada")]
    OrderNotFound(i32),

    #[error("Produto {product_id} sem registro de estoque na concessionária {dealership_rif}")]
    StockNotFound {
        product_id: i32,
        dealership_rif: String,
    },

    #[error("A ordem {0} já possui fatura emitida")]
    InvoiceAlreadyExists(i32),

    #[error("Linha do tempo da ordem inválida: {0}")]
    InvalidOrderTimeline(String),

    #[error("{0} não encontrado(a)")]
    ResourceNotFound(&'static str),

    #[error("Registro duplicado: {0}")]
    AlreadyExists(String),

    #[error("Referência inexistente: {0}")]
    ForeignKeyViolation(String),

    // Variante para erros de banco de dados
    #[error("Erro de banco de dados")]
    DatabaseError(#[from] sqlx::Error),

    // Variante genérica para qualquer outro erro inesperado.
    // `anyhow::Error` é ótimo para capturar o contexto do erro.
    #[error("Erro interno do servidor")]
    InternalServerError(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            // Retorna todos os detalhes da validação, campo a campo.
            AppError::ValidationError(errors) => {
                let mut details = std::collections::HashMap::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages: Vec<String> = field_errors
                        .iter()
                        .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
                        .collect();
                    details.insert(field.to_string(), messages);
                }
                let body = Json(json!({
                    "error": "Um ou mais campos são inválidos.",
                    "details": details,
                }));
                return (StatusCode::BAD_REQUEST, body).into_response();
            }

            AppError::InsufficientStock {
                requested,
                available,
                ref dealership_rif,
            } => {
                let body = Json(json!({
                    "error": format!(
                        "Estoque insuficiente na concessionária {}: solicitado {}, disponível {}",
                        dealership_rif, requested, available
                    ),
                    "requested": requested,
                    "available": available,
                    "dealership": dealership_rif,
                }));
                return (StatusCode::CONFLICT, body).into_response();
            }

            AppError::RoleMismatch { .. }
            | AppError::ManagerRequired
            | AppError::AnalystUnassigned(_)
            | AppError::InvalidOrderTimeline(_) => {
                (StatusCode::UNPROCESSABLE_ENTITY, self.to_string())
            }

            AppError::UnknownStaff(_)
            | AppError::OrderNotFound(_)
            | AppError::StockNotFound { .. }
            | AppError::ResourceNotFound(_) => (StatusCode::NOT_FOUND, self.to_string()),

            AppError::InvoiceAlreadyExists(_) | AppError::AlreadyExists(_) => {
                (StatusCode::CONFLICT, self.to_string())
            }

            AppError::ForeignKeyViolation(_) => {
                (StatusCode::UNPROCESSABLE_ENTITY, self.to_string())
            }

            // Todos os outros erros (DatabaseError, InternalServerError) viram 500.
            // O `tracing` loga a mensagem detalhada que o `thiserror` nos deu.
            ref e => {
                tracing::error!("Erro Interno do Servidor: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Ocorreu um erro inesperado.".to_string(),
                )
            }
        };

        // Resposta padrão para erros que só têm uma mensagem.
        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}
