// ============================================================================
// MODELS - MODULE PRINCIPAL
// ============================================================================
//
// Liste des modules:
//   - health : Health check API
//   - accounts : Comptes (username + hash du mot de passe)
//   - user_documents : Données JSON d'un utilisateur (personnes + equipes)
//   - dto : Corps des requêtes / réponses de l'API
//
// Points d'attention:
//   - Les tables sont créées au démarrage si elles n'existent pas (db::ensure_schema)
//   - user_data.username est une FK vers users.username (ON DELETE CASCADE)
//
// ============================================================================

pub mod health;
pub mod accounts;
pub mod user_documents;
pub mod dto;
