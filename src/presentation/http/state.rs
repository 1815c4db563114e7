use crate::{
    application::{auth::use_case::AuthUseCase, media::use_case::MediaUseCase, social::use_case::SocialUseCase},
    config::Config,
    infrastructure::throttle::traits::SubmitThrottle,
};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub media: Arc<MediaUseCase>,
    pub social: Arc<SocialUseCase>,
    pub auth: Arc<AuthUseCase>,
    pub throttle: Arc<dyn SubmitThrottle>,
    pub config: Config,
}
