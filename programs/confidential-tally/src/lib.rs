// Stops Rust Analyzer complaining about missing configs
// See https://solana.stackexchange.com/questions/17777
#![allow(unexpected_cfgs)]
// Fix warning: use of deprecated method `anchor_lang::prelude::AccountInfo::<'a>::realloc`: Use AccountInfo::resize() instead
// See https://solana.stackexchange.com/questions/22979
#![allow(deprecated)]

use anchor_lang::prelude::*;

pub mod access;
pub mod constants;
pub mod error;
pub mod fhe;
pub mod handlers;
pub mod lifecycle;
pub mod state;
pub mod tally;


use constants::*;
pub use error::ErrorCode;
pub use state::{TallyAccount, VoterRecord};

declare_id!("AxNFGNybd21GD22a2rCMSkYWLQTkTPVnygL9WYTZJnZ6");

#[program]
pub mod confidential_tally {
    use super::*;

    pub fn initialize(
        ctx: Context<Initialize>,
        id: u32,
        num_categories: u16,
        input_verifier: [u8; 64],
    ) -> Result<()> {
        handlers::initialize::initialize(ctx, id, num_categories, input_verifier)
    }

    pub fn vote(ctx: Context<Vote>, encrypted_choice: [u8; 32], proof: Vec<u8>) -> Result<()> {
        handlers::vote::vote(ctx, encrypted_choice, proof)
    }

    pub fn close_voting(ctx: Context<ManageTally>) -> Result<()> {
        handlers::close_voting::close_voting(ctx)
    }

    pub fn publish_histogram(ctx: Context<ManageTally>) -> Result<()> {
        handlers::publish_histogram::publish_histogram(ctx)
    }

    pub fn transfer_ownership(ctx: Context<ManageTally>, new_owner: Pubkey) -> Result<()> {
        handlers::transfer_ownership::transfer_ownership(ctx, new_owner)
    }

    pub fn get_histogram_handles(ctx: Context<ReadTally>) -> Result<Vec<[u8; 32]>> {
        handlers::views::get_histogram_handles(ctx)
    }

    pub fn categories_count(ctx: Context<ReadTally>) -> Result<u8> {
        handlers::views::categories_count(ctx)
    }

    pub fn voting_open(ctx: Context<ReadTally>) -> Result<bool> {
        handlers::views::voting_open(ctx)
    }

    pub fn histogram_published(ctx: Context<ReadTally>) -> Result<bool> {
        handlers::views::histogram_published(ctx)
    }

    pub fn has_voted(ctx: Context<HasVoted>, voter: Pubkey) -> Result<bool> {
        handlers::views::has_voted(ctx, voter)
    }
}

#[derive(Accounts)]
#[instruction(id: u32)]
pub struct Initialize<'info> {
    #[account(mut)]
    pub payer: Signer<'info>,

    #[account(
        init,
        payer = payer,
        space = 8 + TallyAccount::INIT_SPACE,
        seeds = [TALLY_SEED, payer.key().as_ref(), id.to_le_bytes().as_ref()],
        bump,
    )]
    pub tally_account: Box<Account<'info, TallyAccount>>,

    pub system_program: Program<'info, System>,
}

#[derive(Accounts)]
pub struct Vote<'info> {
    #[account(mut)]
    pub voter: Signer<'info>,

    #[account(
        mut,
        seeds = [TALLY_SEED, tally_account.creator.as_ref(), tally_account.id.to_le_bytes().as_ref()],
        bump = tally_account.bump,
    )]
    pub tally_account: Box<Account<'info, TallyAccount>>,

    #[account(
        init_if_needed,
        payer = voter,
        space = 8 + VoterRecord::INIT_SPACE,
        seeds = [VOTER_SEED, tally_account.key().as_ref(), voter.key().as_ref()],
        bump,
    )]
    pub voter_record: Account<'info, VoterRecord>,

    pub system_program: Program<'info, System>,
}

/// Administrative instructions. Ownership is checked by the tally itself so
/// that a stranger gets `Unauthorized` rather than a constraint failure.
#[derive(Accounts)]
pub struct ManageTally<'info> {
    pub owner: Signer<'info>,

    #[account(
        mut,
        seeds = [TALLY_SEED, tally_account.creator.as_ref(), tally_account.id.to_le_bytes().as_ref()],
        bump = tally_account.bump,
    )]
    pub tally_account: Box<Account<'info, TallyAccount>>,
}

#[derive(Accounts)]
pub struct ReadTally<'info> {
    pub tally_account: Box<Account<'info, TallyAccount>>,
}

#[derive(Accounts)]
#[instruction(voter: Pubkey)]
pub struct HasVoted<'info> {
    pub tally_account: Box<Account<'info, TallyAccount>>,

    /// CHECK: address pinned by the seeds. The record may not exist yet, so
    /// its data is read through `VoterRecord::voted_in`.
    #[account(
        seeds = [VOTER_SEED, tally_account.key().as_ref(), voter.as_ref()],
        bump,
    )]
    pub voter_record: UncheckedAccount<'info>,
}
