mod election_scheduler;
mod ledger_confirm;
mod shutdown;
