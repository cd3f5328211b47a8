use futures_util::{future::BoxFuture, Future};
use http::{Request, Response};
use pin_project::pin_project;

use std::{
    pin::Pin,
    sync::Arc,
    task::{ready, Context, Poll},
};
use tower::{Layer, Service};

use crate::{authenticator::BearerAuthenticator, error_handler::ErrorHandler};

trait Authenticate<ReqBody, ResBody> {
    type Future: Future<Output = Result<Request<ReqBody>, Response<ResBody>>>;

    fn authenticate(&mut self, request: Request<ReqBody>) -> Self::Future;
}

impl<S, ReqBody, ResBody> Authenticate<ReqBody, ResBody> for PrincipalService<S, ResBody>
where
    ReqBody: Send + 'static,
    ResBody: Send + 'static,
{
    type Future = BoxFuture<'static, Result<Request<ReqBody>, Response<ResBody>>>;

    fn authenticate(&mut self, request: Request<ReqBody>) -> Self::Future {
        let authenticator = self.authenticator.clone();
        let error_handler = self.error_handler.clone();
        Box::pin(async move {
            match authenticator.authenticate_request(request) {
                Ok(request) => Ok(request),
                Err(error) => Err(error_handler.map_error(error)),
            }
        })
    }
}

pub struct PrincipalLayer<ResBody> {
    authenticator: BearerAuthenticator,
    error_handler: Arc<dyn ErrorHandler<ResBody>>,
}

impl<ResBody> Clone for PrincipalLayer<ResBody> {
    fn clone(&self) -> Self {
        Self {
            authenticator: self.authenticator.clone(),
            error_handler: self.error_handler.clone(),
        }
    }
}

impl<S, ResBody> Layer<S> for PrincipalLayer<ResBody> {
    type Service = PrincipalService<S, ResBody>;

    fn layer(&self, inner: S) -> Self::Service {
        PrincipalService::new(
            inner,
            self.authenticator.clone(),
            self.error_handler.clone(),
        )
    }
}

impl<ResBody> PrincipalLayer<ResBody> {
    pub(crate) fn new(
        authenticator: BearerAuthenticator,
        error_handler: Arc<dyn ErrorHandler<ResBody>>,
    ) -> Self {
        PrincipalLayer {
            authenticator,
            error_handler,
        }
    }
}

pub struct PrincipalService<S, ResBody> {
    inner: S,
    authenticator: BearerAuthenticator,
    error_handler: Arc<dyn ErrorHandler<ResBody>>,
}

impl<S, ResBody> Clone for PrincipalService<S, ResBody>
where
    S: Clone,
{
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
            authenticator: self.authenticator.clone(),
            error_handler: self.error_handler.clone(),
        }
    }
}

impl<S, ResBody> PrincipalService<S, ResBody> {
    fn new(
        inner: S,
        authenticator: BearerAuthenticator,
        error_handler: Arc<dyn ErrorHandler<ResBody>>,
    ) -> Self {
        Self {
            inner,
            authenticator,
            error_handler,
        }
    }
}

impl<S, ReqBody, ResBody> Service<Request<ReqBody>> for PrincipalService<S, ResBody>
where
    S: Service<Request<ReqBody>, Response = Response<ResBody>> + Clone,
    ResBody: Default + Send + 'static,
    ReqBody: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = ResponseFuture<S, ReqBody, ResBody>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, request: Request<ReqBody>) -> Self::Future {
        let inner = self.inner.clone();
        let authenticate = self.authenticate(request);

        ResponseFuture {
            state: State::Authenticate { authenticate },
            service: inner,
        }
    }
}

type AuthenticateFuture<S, ReqBody, ResBody> =
    <PrincipalService<S, ResBody> as Authenticate<ReqBody, ResBody>>::Future;

#[pin_project]
pub struct ResponseFuture<S, ReqBody, ResBody>
where
    S: Service<Request<ReqBody>, Response = Response<ResBody>>,
    ReqBody: Send + 'static,
    ResBody: Send + 'static,
{
    #[pin]
    state: State<AuthenticateFuture<S, ReqBody, ResBody>, S::Future>,
    service: S,
}

#[pin_project(project = StateProj)]
enum State<A, SFut> {
    Authenticate {
        #[pin]
        authenticate: A,
    },
    Authenticated {
        #[pin]
        fut: SFut,
    },
}

impl<S, ReqBody, ResBody> Future for ResponseFuture<S, ReqBody, ResBody>
where
    S: Service<Request<ReqBody>, Response = Response<ResBody>>,
    ResBody: Default + Send + 'static,
    ReqBody: Send + 'static,
{
    type Output = Result<Response<ResBody>, S::Error>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let mut this = self.project();

        loop {
            match this.state.as_mut().project() {
                StateProj::Authenticate { authenticate } => {
                    let auth = ready!(authenticate.poll(cx));
                    match auth {
                        Ok(req) => {
                            let fut = this.service.call(req);
                            this.state.set(State::Authenticated { fut })
                        }
                        Err(res) => {
                            return Poll::Ready(Ok(res));
                        }
                    };
                }
                StateProj::Authenticated { fut } => {
                    return fut.poll(cx);
                }
            }
        }
    }
}
