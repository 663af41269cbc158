macro_rules! rpc_trait {
    (@trait Device [$($head:tt)*] { $($body:tt)* }) => {
        $($head)* {
            $($body)*

            /// Static device name for the configured devices list.
            fn static_name(&self) -> &str;

            /// Unique ID of this device.
            fn unique_id(&self) -> &str;

            /// Name reported by the configured devices list.
            async fn device_name(&self) -> String {
                self.static_name().to_owned()
            }
        }
    };

    // Don't add any extra code for other traits.
    (@trait $trait_name:ident [$($head:tt)*] { $($body:tt)* }) => {
        $($head)* { $($body)* }
    };

    (
        $(# $attr:tt)*
        $pub:vis trait $trait_name:ident: $first_parent:ident $(+ $trait_parents:ident)* {
            $(
                $(#[doc = $doc:literal])*
                #[http($method_path:literal, method = $http_method:ident)]
                async fn $method_name:ident(
                    & $self:ident $(, #[http($param_query:literal $(, via = $param_via:path)?)] $param:ident: $param_ty:ty)* $(,)?
                ) -> ASCOMResult<$return_type:ty> $default_body:tt
            )*
        }
    ) => {
        #[derive(Debug)]
        #[expect(non_camel_case_types)]
        pub(crate) enum Action {
            $(
                $method_name {
                    $(
                        $param: $param_ty,
                    )*
                },
            )*
        }

        #[derive(serde::Serialize)]
        #[serde(untagged)]
        #[expect(non_camel_case_types)]
        pub(crate) enum Response {
            $(
                $method_name($return_type),
            )*
        }

        impl Action {
            /// Whether `action` names an operation of this trait, for any HTTP method.
            pub(crate) fn is_known(action: &str) -> bool {
                [$($method_path),*].contains(&action)
            }

            pub(crate) fn from_parts(action: &str, params: &mut $crate::server::ActionParams) -> $crate::server::Result<Option<Self>> {
                Ok(Some(match (action, params) {
                    $(
                        ($method_path, $crate::server::ActionParams::$http_method(params)) => {
                            #[allow(unused_variables)]
                            let params = params;
                            $(
                                let $param =
                                    params.extract($param_query)
                                    $(.map(<$param_via>::into))?
                                    ?;
                            )*

                            Self::$method_name { $($param),* }
                        }
                    )*
                    _ => return Ok(None),
                }))
            }

            pub(crate) async fn handle(self, device: &dyn $trait_name) -> $crate::ASCOMResult<Response> {
                match self {
                    $(
                        Self::$method_name { $($param),* } => {
                            device.$method_name($($param),*).await.map(Response::$method_name)
                        }
                    )*
                }
            }
        }

        // The extras are spliced in before `#[async_trait]` sees the trait body.
        rpc_trait!(@trait $trait_name
            [
                $(# $attr)*
                #[async_trait::async_trait]
                #[allow(unused_variables)]
                $pub trait $trait_name: $first_parent $(+ $trait_parents)*
            ]
            {
                $(
                    $(#[doc = $doc])*
                    ///
                    /// Definition before the `#[async_trait]` expansion:
                    ///
                    /// ```ignore
                    #[doc = concat!("async fn ", stringify!($method_name), "(&self", $(", ", stringify!($param), ": ", stringify!($param_ty),)* ") -> ASCOMResult<", stringify!($return_type), ">")]
                    /// # { unimplemented!() }
                    /// ```
                    async fn $method_name(
                        & $self $(, $param: $param_ty)*
                    ) -> ASCOMResult<$return_type> $default_body
                )*
            }
        );
    };
}
