use crate::{
    data::ticket::TicketRepository,
    error::AppError,
    model::ticket::{CreateTicketParam, TicketData, TicketStatus},
};
use sea_orm::{EntityTrait, PaginatorTrait};
use test_utils::{builder::TestBuilder, factory};

mod create;
mod find;
mod update_data;
mod update_status;

fn param(guild_id: &str, channel_id: &str, user_id: &str) -> CreateTicketParam {
    CreateTicketParam {
        guild_id: guild_id.to_string(),
        channel_id: channel_id.to_string(),
        user_id: user_id.to_string(),
        data: TicketData::default(),
    }
}
