use crate::{
    data::transcript::TranscriptRepository,
    error::AppError,
    model::transcript::{CreateTranscriptParam, TranscriptTicketInfo},
};
use sea_orm::EntityTrait;
use test_utils::{builder::TestBuilder, factory};

mod create;
mod mark_accessed;
