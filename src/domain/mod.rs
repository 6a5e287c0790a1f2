//! Domain layer: connection identity, group events, the channel-layer
//! abstraction with its process-local registry, and the shopping-list
//! aggregation fold.

pub mod channel_layer;
pub mod connection_id;
pub mod event;
pub mod group_registry;
pub mod shopping_list;

pub use channel_layer::{ChannelLayer, EventSink};
pub use connection_id::ConnectionId;
pub use event::{ChatEvent, GroupEvent, NotifyEvent};
pub use group_registry::GroupRegistry;
pub use shopping_list::{CartRecipe, IngredientLine, ShoppingListLine};
