//! Dart source stubs for each template
//!
//! Stub bodies are plain text with `{{placeholder}}` markers, rendered by
//! [`StubContext::render`]. Each generator is a pure function of the context.

use super::{StubContext, StubSpec, TemplateBundle, TemplateId};

pub const DEFAULT_BUNDLE: TemplateBundle = TemplateBundle {
    id: TemplateId::Default,
    description: "Plain StatefulWidget screens",
    directories: &["lib/screens", "lib/widgets/common"],
    stubs: &[
        StubSpec {
            name: "main",
            path: "lib/main.dart",
            generate: default_main,
        },
        StubSpec {
            name: "home_screen",
            path: "lib/screens/home_screen.dart",
            generate: default_home_screen,
        },
    ],
};

pub const MVVM_BUNDLE: TemplateBundle = TemplateBundle {
    id: TemplateId::Mvvm,
    description: "Views backed by ChangeNotifier view-models (provider + get_it)",
    directories: &["lib/views", "lib/viewmodels", "lib/services"],
    stubs: &[
        StubSpec {
            name: "main",
            path: "lib/main.dart",
            generate: mvvm_main,
        },
        StubSpec {
            name: "home_view",
            path: "lib/views/home_view.dart",
            generate: mvvm_home_view,
        },
        StubSpec {
            name: "home_view_model",
            path: "lib/viewmodels/home_view_model.dart",
            generate: mvvm_home_view_model,
        },
        StubSpec {
            name: "api_service",
            path: "lib/services/api_service.dart",
            generate: mvvm_api_service,
        },
    ],
};

pub const BLOC_BUNDLE: TemplateBundle = TemplateBundle {
    id: TemplateId::Bloc,
    description: "Event-driven state with flutter_bloc",
    directories: &["lib/bloc", "lib/repositories"],
    stubs: &[
        StubSpec {
            name: "main",
            path: "lib/main.dart",
            generate: bloc_main,
        },
        StubSpec {
            name: "counter_event",
            path: "lib/bloc/counter_event.dart",
            generate: bloc_event,
        },
        StubSpec {
            name: "counter_state",
            path: "lib/bloc/counter_state.dart",
            generate: bloc_state,
        },
        StubSpec {
            name: "counter_bloc",
            path: "lib/bloc/counter_bloc.dart",
            generate: bloc_bloc,
        },
        StubSpec {
            name: "counter_repository",
            path: "lib/repositories/counter_repository.dart",
            generate: bloc_repository,
        },
        StubSpec {
            name: "home_screen",
            path: "lib/screens/home_screen.dart",
            generate: bloc_home_screen,
        },
    ],
};

/// Stubs written regardless of template
pub const COMMON: &[StubSpec] = &[
    StubSpec {
        name: "constants",
        path: "lib/utils/constants.dart",
        generate: common_constants,
    },
    StubSpec {
        name: "env",
        path: "lib/config/env.dart",
        generate: common_env,
    },
    StubSpec {
        name: "env_example",
        path: ".env.example",
        generate: common_env_example,
    },
    StubSpec {
        name: "readme",
        path: "README.md",
        generate: common_readme,
    },
];

fn default_main(ctx: &StubContext) -> String {
    ctx.render(
        r#"import 'package:flutter/material.dart';

import 'package:{{package_name}}/config/env.dart';
import 'package:{{package_name}}/screens/home_screen.dart';
import 'package:{{package_name}}/utils/constants.dart';

Future<void> main() async {
  WidgetsFlutterBinding.ensureInitialized();
  await Env.load();
  runApp(const App());
}

class App extends StatelessWidget {
  const App({super.key});

  @override
  Widget build(BuildContext context) {
    return MaterialApp(
      title: AppConstants.appName,
      theme: ThemeData(
        colorScheme: ColorScheme.fromSeed(seedColor: Colors.indigo),
        useMaterial3: true,
      ),
      home: const HomeScreen(),
    );
  }
}
"#,
    )
}

fn default_home_screen(ctx: &StubContext) -> String {
    ctx.render(
        r#"import 'package:flutter/material.dart';

import 'package:{{package_name}}/utils/constants.dart';

class HomeScreen extends StatefulWidget {
  const HomeScreen({super.key});

  @override
  State<HomeScreen> createState() => _HomeScreenState();
}

class _HomeScreenState extends State<HomeScreen> {
  int _counter = 0;

  void _increment() {
    setState(() => _counter++);
  }

  @override
  Widget build(BuildContext context) {
    return Scaffold(
      appBar: AppBar(title: const Text(AppConstants.appName)),
      body: Center(
        child: Text(
          'Pressed $_counter times',
          style: Theme.of(context).textTheme.headlineMedium,
        ),
      ),
      floatingActionButton: FloatingActionButton(
        onPressed: _increment,
        tooltip: 'Increment',
        child: const Icon(Icons.add),
      ),
    );
  }
}
"#,
    )
}

fn mvvm_main(ctx: &StubContext) -> String {
    ctx.render(
        r#"import 'package:flutter/material.dart';
import 'package:get_it/get_it.dart';
import 'package:provider/provider.dart';

import 'package:{{package_name}}/config/env.dart';
import 'package:{{package_name}}/services/api_service.dart';
import 'package:{{package_name}}/utils/constants.dart';
import 'package:{{package_name}}/viewmodels/home_view_model.dart';
import 'package:{{package_name}}/views/home_view.dart';

final GetIt locator = GetIt.instance;

void setupLocator() {
  locator.registerLazySingleton<ApiService>(() => ApiService(baseUrl: Env.apiBaseUrl));
}

Future<void> main() async {
  WidgetsFlutterBinding.ensureInitialized();
  await Env.load();
  setupLocator();
  runApp(const App());
}

class App extends StatelessWidget {
  const App({super.key});

  @override
  Widget build(BuildContext context) {
    return ChangeNotifierProvider(
      create: (_) => HomeViewModel(locator<ApiService>()),
      child: MaterialApp(
        title: AppConstants.appName,
        theme: ThemeData(
          colorScheme: ColorScheme.fromSeed(seedColor: Colors.teal),
          useMaterial3: true,
        ),
        home: const HomeView(),
      ),
    );
  }
}
"#,
    )
}

fn mvvm_home_view(ctx: &StubContext) -> String {
    ctx.render(
        r#"import 'package:flutter/material.dart';
import 'package:provider/provider.dart';

import 'package:{{package_name}}/utils/constants.dart';
import 'package:{{package_name}}/viewmodels/home_view_model.dart';

class HomeView extends StatelessWidget {
  const HomeView({super.key});

  @override
  Widget build(BuildContext context) {
    final viewModel = context.watch<HomeViewModel>();

    return Scaffold(
      appBar: AppBar(title: const Text(AppConstants.appName)),
      body: Center(
        child: viewModel.isLoading
            ? const CircularProgressIndicator()
            : Text(viewModel.message ?? 'Tap refresh to load data'),
      ),
      floatingActionButton: FloatingActionButton(
        onPressed: viewModel.isLoading ? null : viewModel.refresh,
        tooltip: 'Refresh',
        child: const Icon(Icons.refresh),
      ),
    );
  }
}
"#,
    )
}

fn mvvm_home_view_model(ctx: &StubContext) -> String {
    ctx.render(
        r#"import 'package:flutter/foundation.dart';

import 'package:{{package_name}}/services/api_service.dart';

class HomeViewModel extends ChangeNotifier {
  HomeViewModel(this._api);

  final ApiService _api;

  bool _isLoading = false;
  String? _message;

  bool get isLoading => _isLoading;
  String? get message => _message;

  Future<void> refresh() async {
    _isLoading = true;
    notifyListeners();
    try {
      _message = await _api.fetchGreeting();
    } catch (error) {
      _message = 'Something went wrong: $error';
    } finally {
      _isLoading = false;
      notifyListeners();
    }
  }
}
"#,
    )
}

fn mvvm_api_service(ctx: &StubContext) -> String {
    ctx.render(
        r#"import 'package:http/http.dart' as http;

class ApiService {
  ApiService({required this.baseUrl, http.Client? client})
      : _client = client ?? http.Client();

  final String baseUrl;
  final http.Client _client;

  Future<String> fetchGreeting() async {
    final response = await _client.get(Uri.parse('$baseUrl/greeting'));
    if (response.statusCode != 200) {
      throw Exception('Request failed with status ${response.statusCode}');
    }
    return response.body;
  }
}
"#,
    )
}

fn bloc_main(ctx: &StubContext) -> String {
    ctx.render(
        r#"import 'package:flutter/material.dart';
import 'package:flutter_bloc/flutter_bloc.dart';

import 'package:{{package_name}}/bloc/counter_bloc.dart';
import 'package:{{package_name}}/config/env.dart';
import 'package:{{package_name}}/repositories/counter_repository.dart';
import 'package:{{package_name}}/screens/home_screen.dart';
import 'package:{{package_name}}/utils/constants.dart';

Future<void> main() async {
  WidgetsFlutterBinding.ensureInitialized();
  await Env.load();
  runApp(const App());
}

class App extends StatelessWidget {
  const App({super.key});

  @override
  Widget build(BuildContext context) {
    return RepositoryProvider(
      create: (_) => CounterRepository(),
      child: BlocProvider(
        create: (context) => CounterBloc(
          repository: context.read<CounterRepository>(),
        )..add(const CounterStarted()),
        child: MaterialApp(
          title: AppConstants.appName,
          theme: ThemeData(
            colorScheme: ColorScheme.fromSeed(seedColor: Colors.deepPurple),
            useMaterial3: true,
          ),
          home: const HomeScreen(),
        ),
      ),
    );
  }
}
"#,
    )
}

fn bloc_event(_ctx: &StubContext) -> String {
    r#"part of 'counter_bloc.dart';

sealed class CounterEvent extends Equatable {
  const CounterEvent();

  @override
  List<Object?> get props => [];
}

final class CounterStarted extends CounterEvent {
  const CounterStarted();
}

final class CounterIncremented extends CounterEvent {
  const CounterIncremented();
}

final class CounterDecremented extends CounterEvent {
  const CounterDecremented();
}
"#
    .to_string()
}

fn bloc_state(_ctx: &StubContext) -> String {
    r#"part of 'counter_bloc.dart';

final class CounterState extends Equatable {
  const CounterState({this.value = 0, this.isLoading = false});

  final int value;
  final bool isLoading;

  CounterState copyWith({int? value, bool? isLoading}) {
    return CounterState(
      value: value ?? this.value,
      isLoading: isLoading ?? this.isLoading,
    );
  }

  @override
  List<Object?> get props => [value, isLoading];
}
"#
    .to_string()
}

fn bloc_bloc(ctx: &StubContext) -> String {
    ctx.render(
        r#"import 'package:equatable/equatable.dart';
import 'package:flutter_bloc/flutter_bloc.dart';

import 'package:{{package_name}}/repositories/counter_repository.dart';

part 'counter_event.dart';
part 'counter_state.dart';

class CounterBloc extends Bloc<CounterEvent, CounterState> {
  CounterBloc({required CounterRepository repository})
      : _repository = repository,
        super(const CounterState()) {
    on<CounterStarted>(_onStarted);
    on<CounterIncremented>(_onIncremented);
    on<CounterDecremented>(_onDecremented);
  }

  final CounterRepository _repository;

  Future<void> _onStarted(CounterStarted event, Emitter<CounterState> emit) async {
    emit(state.copyWith(isLoading: true));
    final value = await _repository.load();
    emit(state.copyWith(value: value, isLoading: false));
  }

  Future<void> _onIncremented(CounterIncremented event, Emitter<CounterState> emit) async {
    final value = state.value + 1;
    emit(state.copyWith(value: value));
    await _repository.save(value);
  }

  Future<void> _onDecremented(CounterDecremented event, Emitter<CounterState> emit) async {
    final value = state.value - 1;
    emit(state.copyWith(value: value));
    await _repository.save(value);
  }
}
"#,
    )
}

fn bloc_repository(_ctx: &StubContext) -> String {
    r#"import 'package:shared_preferences/shared_preferences.dart';

class CounterRepository {
  static const _key = 'counter';

  Future<int> load() async {
    final prefs = await SharedPreferences.getInstance();
    return prefs.getInt(_key) ?? 0;
  }

  Future<void> save(int value) async {
    final prefs = await SharedPreferences.getInstance();
    await prefs.setInt(_key, value);
  }
}
"#
    .to_string()
}

fn bloc_home_screen(ctx: &StubContext) -> String {
    ctx.render(
        r#"import 'package:flutter/material.dart';
import 'package:flutter_bloc/flutter_bloc.dart';

import 'package:{{package_name}}/bloc/counter_bloc.dart';
import 'package:{{package_name}}/utils/constants.dart';

class HomeScreen extends StatelessWidget {
  const HomeScreen({super.key});

  @override
  Widget build(BuildContext context) {
    return Scaffold(
      appBar: AppBar(title: const Text(AppConstants.appName)),
      body: Center(
        child: BlocBuilder<CounterBloc, CounterState>(
          builder: (context, state) {
            if (state.isLoading) {
              return const CircularProgressIndicator();
            }
            return Text(
              '${state.value}',
              style: Theme.of(context).textTheme.displayMedium,
            );
          },
        ),
      ),
      floatingActionButton: Column(
        mainAxisSize: MainAxisSize.min,
        children: [
          FloatingActionButton(
            heroTag: 'increment',
            onPressed: () => context.read<CounterBloc>().add(const CounterIncremented()),
            child: const Icon(Icons.add),
          ),
          const SizedBox(height: 12),
          FloatingActionButton(
            heroTag: 'decrement',
            onPressed: () => context.read<CounterBloc>().add(const CounterDecremented()),
            child: const Icon(Icons.remove),
          ),
        ],
      ),
    );
  }
}
"#,
    )
}

fn common_constants(ctx: &StubContext) -> String {
    ctx.render(
        r#"class AppConstants {
  AppConstants._();

  static const String appName = '{{project_name_literal}}';
  static const String appDescription = '{{description_literal}}';

  static const Duration requestTimeout = Duration(seconds: 30);
  static const double defaultPadding = 16;
}
"#,
    )
}

fn common_env(_ctx: &StubContext) -> String {
    r#"import 'package:flutter_dotenv/flutter_dotenv.dart';

/// Runtime configuration read from the `.env` file.
class Env {
  Env._();

  static Future<void> load() => dotenv.load(fileName: '.env', isOptional: true);

  static String get apiBaseUrl =>
      dotenv.maybeGet('API_BASE_URL') ?? 'https://api.example.com';

  static String get environment => dotenv.maybeGet('ENVIRONMENT') ?? 'development';

  static bool get isProduction => environment == 'production';
}
"#
    .to_string()
}

fn common_env_example(_ctx: &StubContext) -> String {
    "API_BASE_URL=https://api.example.com\nENVIRONMENT=development\n".to_string()
}

fn common_readme(ctx: &StubContext) -> String {
    ctx.render(
        r#"# {{project_name}}

{{description}}

Generated with the `{{template}}` template.

## Project layout

- `lib/config/` - environment configuration
- `lib/models/` - plain data classes
- `lib/screens/` - top-level pages
- `lib/services/` - API clients and platform services
- `lib/utils/` - constants and helpers
- `lib/widgets/` - reusable widgets
- `assets/` - images and fonts

## Getting started

```sh
cp .env.example .env
flutter pub get
flutter run
```

## Testing

```sh
flutter test
```
"#,
    )
}
